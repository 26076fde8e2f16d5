use core::fmt;

/// Where the grammar state machine is within the document.
///
/// `Start` is both the initial state and the state the machine returns to
/// once the outermost scope closes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum State {
    /// Outside any scope.
    #[default]
    Start,
    /// Just inside `{`, before the first key.
    InObject,
    /// Reading the characters of a key.
    InObjectKey,
    /// After a key's closing quote, expecting `:`.
    AfterKey,
    /// After `:`, expecting a value.
    AfterColon,
    /// Reading the characters of a string value.
    InStringValue,
    /// Reading the digits of a number value.
    InNumberValue,
    /// After a complete value, expecting `,` or a closing bracket.
    AfterValue,
    /// After `,` in an object, expecting the next key.
    BetweenMembers,
    /// Inside `[`, expecting an element or `]`.
    InArray,
}

impl State {
    /// Every state, in declaration order.
    pub const ALL: [State; 10] = [
        State::Start,
        State::InObject,
        State::InObjectKey,
        State::AfterKey,
        State::AfterColon,
        State::InStringValue,
        State::InNumberValue,
        State::AfterValue,
        State::BetweenMembers,
        State::InArray,
    ];
}

impl fmt::Display for State {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}
