/// Configuration for the grammar state machine and the driver.
///
/// # Examples
///
/// ```rust
/// use jsonmapper::{GrammarStateMachine, ObjectSink, ParserOptions};
///
/// let machine = GrammarStateMachine::with_options(
///     ObjectSink::shared(),
///     ParserOptions {
///         discard_unmapped: true,
///         ..Default::default()
///     },
/// );
/// ```
///
/// # Default
///
/// All options default to `false`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(default)
)]
#[allow(clippy::struct_excessive_bools)]
pub struct ParserOptions {
    /// Whether a nested member without a sink is skipped rather than failing
    /// the parse.
    ///
    /// When [`Mapper::mapper_for`](crate::Mapper::mapper_for) returns `None`
    /// and this is `true`, the nested scope is routed to a
    /// [`Discard`](crate::Discard) sink.
    ///
    /// # Default
    ///
    /// `false`
    pub discard_unmapped: bool,

    /// Whether number members are delivered to
    /// [`Mapper::set_number`](crate::Mapper::set_number).
    ///
    /// When `false`, the digits of a number are consumed without being
    /// buffered and no sink sees them.
    ///
    /// # Default
    ///
    /// `false`
    pub deliver_numbers: bool,

    /// Whether the driver fails when the input ends before the outermost
    /// scope is closed.
    ///
    /// When `false`, exhausting the source is always a success and the caller
    /// can inspect [`GrammarStateMachine::is_complete`](crate::GrammarStateMachine::is_complete).
    ///
    /// # Default
    ///
    /// `false`
    pub require_complete: bool,

    /// Whether another top-level object may follow a completed one.
    ///
    /// When `false`, the machine accepts only whitespace once the outermost
    /// object has closed. When `true`, every following object is routed to
    /// the root sink again.
    ///
    /// # Default
    ///
    /// `false`
    pub allow_multiple_documents: bool,
}
