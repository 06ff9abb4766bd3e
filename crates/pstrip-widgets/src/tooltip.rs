#![forbid(unsafe_code)]

//! Hover text for status spans.

use crate::partition::PartitionState;
use crate::span::Span;

/// How a strip describes the span under the pointer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TooltipMode<'a> {
    /// "Partition p7 is completed" / "Partitions p2 through p5 are failed".
    #[default]
    Status,
    /// The same literal text for every span.
    Message(&'a str),
    /// No tooltip.
    Hidden,
}

/// Sentence describing the state of `span`.
///
/// Returns `None` if the span's endpoints are not in `names`.
pub fn status_text<N: AsRef<str>>(span: &Span, names: &[N]) -> Option<String> {
    let status = span.status.label().to_lowercase();
    let first = names.get(span.start_idx)?.as_ref();
    if span.start_idx == span.end_idx {
        return Some(format!("Partition {first} is {status}"));
    }
    let last = names.get(span.end_idx)?.as_ref();
    Some(format!("Partitions {first} through {last} are {status}"))
}

/// Tooltip for `span` under `mode`.
pub fn tooltip_text<N: AsRef<str>>(
    mode: TooltipMode<'_>,
    span: &Span<PartitionState>,
    names: &[N],
) -> Option<String> {
    match mode {
        TooltipMode::Status => status_text(span, names),
        TooltipMode::Message(message) => Some(message.to_owned()),
        TooltipMode::Hidden => None,
    }
}
