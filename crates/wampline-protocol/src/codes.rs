//! Message code tables: the mapping from symbolic protocol operations to
//! numeric wire codes.
//!
//! A WAMP-like peer does not send operation names over the wire; it sends
//! a small integer as the first element of every JSON array frame. Which
//! integer means "Subscribe" depends on the peer: the standard basic
//! profile says 33, the League client says 5, and so on. This module keeps
//! that mapping in one immutable value, the [`SubscriberCodes`] table, so
//! the rest of the stack can talk in symbols.
//!
//! Tables are built in two phases: a mutable [`SubscriberCodesBuilder`]
//! collects code assignments, and [`SubscriberCodesBuilder::build`] freezes
//! them into an immutable [`SubscriberCodes`]. There are no setters on the
//! frozen value, so a table handed to a session can never change under it,
//! and a `&'static` table (like [`SubscriberCodes::basic_profile`]) is safe
//! to share across sessions and threads.

use std::fmt;

use crate::ProtocolError;

// ---------------------------------------------------------------------------
// Operation
// ---------------------------------------------------------------------------

/// The symbolic protocol operations a subscriber-role table can name.
///
/// The first five are the base operations every role shares; their codes
/// are always optional. The rest belong to the subscriber role:
/// `Subscribe`, `Unsubscribe`, and `Event` are required (a subscriber that
/// cannot subscribe is useless), while the acknowledgement codes
/// `Subscribed` and `Unsubscribed` are optional because some peers never
/// send them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    Hello,
    Welcome,
    Abort,
    Goodbye,
    Error,
    Subscribe,
    Subscribed,
    Unsubscribe,
    Unsubscribed,
    Event,
}

impl Operation {
    /// Every operation, in declaration order. Enum projection iterates this.
    pub const ALL: [Operation; 10] = [
        Operation::Hello,
        Operation::Welcome,
        Operation::Abort,
        Operation::Goodbye,
        Operation::Error,
        Operation::Subscribe,
        Operation::Subscribed,
        Operation::Unsubscribe,
        Operation::Unsubscribed,
        Operation::Event,
    ];

    /// The operations a subscriber-role table must assign a code to.
    pub const SUBSCRIBER_REQUIRED: [Operation; 3] =
        [Operation::Subscribe, Operation::Unsubscribe, Operation::Event];

    /// The symbolic name, exactly as enum projection matches it.
    pub fn symbol(self) -> &'static str {
        match self {
            Operation::Hello => "Hello",
            Operation::Welcome => "Welcome",
            Operation::Abort => "Abort",
            Operation::Goodbye => "Goodbye",
            Operation::Error => "Error",
            Operation::Subscribe => "Subscribe",
            Operation::Subscribed => "Subscribed",
            Operation::Unsubscribe => "Unsubscribe",
            Operation::Unsubscribed => "Unsubscribed",
            Operation::Event => "Event",
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

// ---------------------------------------------------------------------------
// CodeEnum
// ---------------------------------------------------------------------------

/// A user-defined enumeration of message codes.
///
/// Implementing this trait lets an application-defined enum stand in for
/// raw `u16` codes everywhere: [`SubscriberCodes::from_enum`] projects it
/// onto a code table, and the typed session surfaces re-expose send/receive
/// with the enum substituted for the numeric code.
///
/// Use the [`code_enum!`](crate::code_enum) macro instead of implementing
/// this by hand; it derives all three methods from the variant list.
pub trait CodeEnum: Copy + Send + Sync + 'static {
    /// The numeric wire code of this member.
    fn code(self) -> u16;

    /// The member with the given wire code, if the enum models it.
    ///
    /// Returning `None` here is not an error condition: the typed message
    /// layer wraps unmodelled codes as
    /// [`EnumCode::Unknown`](crate::EnumCode::Unknown) so that protocol
    /// evolution on the peer side never breaks a deployed client.
    fn from_code(code: u16) -> Option<Self>;

    /// The member whose name matches the given operation's symbol, if any.
    ///
    /// This is the projection hook: `Subscribe = 5` in a user enum means
    /// `for_operation(Operation::Subscribe)` returns that member.
    fn for_operation(op: Operation) -> Option<Self>;
}

/// Defines a fieldless `u16` enum and implements [`CodeEnum`] for it.
///
/// Variant names that match an [`Operation`] symbol participate in
/// [`SubscriberCodes::from_enum`] projection; other variants are still
/// usable as typed codes on the session surface.
///
/// ```
/// use wampline_protocol::{code_enum, Operation, SubscriberCodes};
///
/// code_enum! {
///     /// Codes spoken by the League of Legends client.
///     pub enum LeagueCode {
///         Subscribe = 5,
///         Unsubscribe = 6,
///         Event = 8,
///     }
/// }
///
/// let codes = SubscriberCodes::from_enum::<LeagueCode>().unwrap();
/// assert_eq!(codes.subscribe(), 5);
/// assert_eq!(codes.get(Operation::Hello), None);
/// ```
#[macro_export]
macro_rules! code_enum {
    (
        $(#[$meta:meta])*
        $vis:vis enum $name:ident {
            $($(#[$vmeta:meta])* $variant:ident = $value:expr),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        #[repr(u16)]
        $vis enum $name {
            $($(#[$vmeta])* $variant = $value),+
        }

        impl $crate::CodeEnum for $name {
            fn code(self) -> u16 {
                self as u16
            }

            fn from_code(code: u16) -> Option<Self> {
                $(if code == $name::$variant as u16 {
                    return Some($name::$variant);
                })+
                None
            }

            fn for_operation(op: $crate::Operation) -> Option<Self> {
                $(if op.symbol() == stringify!($variant) {
                    return Some($name::$variant);
                })+
                None
            }
        }
    };
}

// ---------------------------------------------------------------------------
// SubscriberCodes
// ---------------------------------------------------------------------------

/// The immutable code table for the subscriber role.
///
/// Holds one optional code per base operation and the subscriber role's
/// codes (`Subscribe`/`Unsubscribe`/`Event` required, acknowledgements
/// optional). Construction goes through [`SubscriberCodes::builder`],
/// [`SubscriberCodes::from_enum`], or the shared
/// [`SubscriberCodes::basic_profile`]; once built, a table cannot change.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubscriberCodes {
    hello: Option<u16>,
    welcome: Option<u16>,
    abort: Option<u16>,
    goodbye: Option<u16>,
    error: Option<u16>,
    subscribe: u16,
    subscribed: Option<u16>,
    unsubscribe: u16,
    unsubscribed: Option<u16>,
    event: u16,
}

/// The standard basic-profile assignment.
///
/// Subscribe and Subscribed genuinely share code 33; see
/// [`SubscriberCodes::basic_profile`].
static BASIC_PROFILE: SubscriberCodes = SubscriberCodes {
    hello: Some(1),
    welcome: Some(2),
    abort: Some(3),
    goodbye: Some(6),
    error: Some(8),
    subscribe: 33,
    subscribed: Some(33),
    unsubscribe: 34,
    unsubscribed: Some(35),
    event: 36,
};

impl SubscriberCodes {
    /// Starts a mutable builder with every code unset.
    pub fn builder() -> SubscriberCodesBuilder {
        SubscriberCodesBuilder::default()
    }

    /// Builds a table by projecting a user enum onto the operation set.
    ///
    /// Every enum member whose name matches an [`Operation`] symbol
    /// contributes its numeric value; operations the enum does not name
    /// stay unset.
    ///
    /// # Errors
    /// [`ProtocolError::MissingCode`] if the enum leaves any of
    /// `Subscribe`, `Unsubscribe`, or `Event` without a code.
    pub fn from_enum<E: CodeEnum>() -> Result<Self, ProtocolError> {
        let mut builder = Self::builder();
        for op in Operation::ALL {
            if let Some(member) = E::for_operation(op) {
                builder = builder.set(op, member.code());
            }
        }
        builder.build()
    }

    /// The shared, read-only table for the protocol's basic profile:
    /// Hello=1, Welcome=2, Abort=3, Goodbye=6, Error=8, Subscribe=33,
    /// Subscribed=33, Unsubscribe=34, Unsubscribed=35, Event=36.
    ///
    /// Subscribe and Subscribed both map to 33. That is the basic
    /// profile's own assignment, not a typo: a receiver cannot tell a
    /// "Subscribed" acknowledgement from a looped-back "Subscribe" request
    /// by code alone and must use connection direction to disambiguate.
    ///
    /// Because Rust enums reject duplicate discriminants, this table
    /// cannot be declared through [`code_enum!`](crate::code_enum); it is
    /// the one table built here by hand.
    pub fn basic_profile() -> &'static SubscriberCodes {
        &BASIC_PROFILE
    }

    /// The code assigned to an operation, if any. Required operations
    /// always return `Some`.
    pub fn get(&self, op: Operation) -> Option<u16> {
        match op {
            Operation::Hello => self.hello,
            Operation::Welcome => self.welcome,
            Operation::Abort => self.abort,
            Operation::Goodbye => self.goodbye,
            Operation::Error => self.error,
            Operation::Subscribe => Some(self.subscribe),
            Operation::Subscribed => self.subscribed,
            Operation::Unsubscribe => Some(self.unsubscribe),
            Operation::Unsubscribed => self.unsubscribed,
            Operation::Event => Some(self.event),
        }
    }

    pub fn hello(&self) -> Option<u16> {
        self.hello
    }

    pub fn welcome(&self) -> Option<u16> {
        self.welcome
    }

    pub fn abort(&self) -> Option<u16> {
        self.abort
    }

    pub fn goodbye(&self) -> Option<u16> {
        self.goodbye
    }

    pub fn error(&self) -> Option<u16> {
        self.error
    }

    pub fn subscribe(&self) -> u16 {
        self.subscribe
    }

    pub fn subscribed(&self) -> Option<u16> {
        self.subscribed
    }

    pub fn unsubscribe(&self) -> u16 {
        self.unsubscribe
    }

    pub fn unsubscribed(&self) -> Option<u16> {
        self.unsubscribed
    }

    pub fn event(&self) -> u16 {
        self.event
    }
}

// ---------------------------------------------------------------------------
// SubscriberCodesBuilder
// ---------------------------------------------------------------------------

/// The mutable phase of table construction.
///
/// All ten operations are settable; [`build`](Self::build) checks that the
/// subscriber role's required operations ended up assigned and freezes the
/// rest as-is.
#[derive(Debug, Clone, Default)]
pub struct SubscriberCodesBuilder {
    hello: Option<u16>,
    welcome: Option<u16>,
    abort: Option<u16>,
    goodbye: Option<u16>,
    error: Option<u16>,
    subscribe: Option<u16>,
    subscribed: Option<u16>,
    unsubscribe: Option<u16>,
    unsubscribed: Option<u16>,
    event: Option<u16>,
}

impl SubscriberCodesBuilder {
    pub fn hello(mut self, code: u16) -> Self {
        self.hello = Some(code);
        self
    }

    pub fn welcome(mut self, code: u16) -> Self {
        self.welcome = Some(code);
        self
    }

    pub fn abort(mut self, code: u16) -> Self {
        self.abort = Some(code);
        self
    }

    pub fn goodbye(mut self, code: u16) -> Self {
        self.goodbye = Some(code);
        self
    }

    pub fn error(mut self, code: u16) -> Self {
        self.error = Some(code);
        self
    }

    pub fn subscribe(mut self, code: u16) -> Self {
        self.subscribe = Some(code);
        self
    }

    pub fn subscribed(mut self, code: u16) -> Self {
        self.subscribed = Some(code);
        self
    }

    pub fn unsubscribe(mut self, code: u16) -> Self {
        self.unsubscribe = Some(code);
        self
    }

    pub fn unsubscribed(mut self, code: u16) -> Self {
        self.unsubscribed = Some(code);
        self
    }

    pub fn event(mut self, code: u16) -> Self {
        self.event = Some(code);
        self
    }

    /// Assigns a code by operation instead of by named setter.
    pub fn set(self, op: Operation, code: u16) -> Self {
        match op {
            Operation::Hello => self.hello(code),
            Operation::Welcome => self.welcome(code),
            Operation::Abort => self.abort(code),
            Operation::Goodbye => self.goodbye(code),
            Operation::Error => self.error(code),
            Operation::Subscribe => self.subscribe(code),
            Operation::Subscribed => self.subscribed(code),
            Operation::Unsubscribe => self.unsubscribe(code),
            Operation::Unsubscribed => self.unsubscribed(code),
            Operation::Event => self.event(code),
        }
    }

    /// Freezes the builder into an immutable table.
    ///
    /// # Errors
    /// [`ProtocolError::MissingCode`] naming the first required operation
    /// that was never assigned.
    pub fn build(self) -> Result<SubscriberCodes, ProtocolError> {
        let subscribe = self
            .subscribe
            .ok_or(ProtocolError::MissingCode(Operation::Subscribe))?;
        let unsubscribe = self
            .unsubscribe
            .ok_or(ProtocolError::MissingCode(Operation::Unsubscribe))?;
        let event = self
            .event
            .ok_or(ProtocolError::MissingCode(Operation::Event))?;

        Ok(SubscriberCodes {
            hello: self.hello,
            welcome: self.welcome,
            abort: self.abort,
            goodbye: self.goodbye,
            error: self.error,
            subscribe,
            subscribed: self.subscribed,
            unsubscribe,
            unsubscribed: self.unsubscribed,
            event,
        })
    }
}
