//! Macros for declaring state and event enums.

#[doc(hidden)]
#[macro_export]
macro_rules! __symbol_enum {
    (
        $symbol:path;
        $(#[$meta:meta])*
        $vis:vis enum $name:ident {
            $(
                $(#[$variant_meta:meta])*
                $variant:ident
            ),* $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(
            Clone, Copy, PartialEq, Eq, Hash, Debug, serde::Serialize, serde::Deserialize,
        )]
        $vis enum $name {
            $(
                $(#[$variant_meta])*
                $variant
            ),*
        }

        impl $name {
            /// Every variant, in declaration order.
            #[allow(dead_code)]
            pub const ALL: &'static [Self] = &[$(Self::$variant),*];
        }

        impl $symbol for $name {
            fn name(&self) -> &str {
                match self {
                    $(Self::$variant => stringify!($variant)),*
                }
            }
        }

        impl ::std::fmt::Display for $name {
            fn fmt(&self, f: &mut ::std::fmt::Formatter<'_>) -> ::std::fmt::Result {
                f.write_str(<Self as $symbol>::name(self))
            }
        }
    };
}

/// Declare a state enum and implement [`State`](crate::core::State) for it.
///
/// Variant names become state names, and an associated `ALL` constant
/// lists every variant in declaration order.
///
/// # Example
///
/// ```
/// use automaton::core::State;
/// use automaton::state_enum;
///
/// state_enum! {
///     pub enum Phase {
///         Idle,
///         Running,
///     }
/// }
///
/// assert_eq!(Phase::Running.name(), "Running");
/// assert_eq!(Phase::ALL, &[Phase::Idle, Phase::Running]);
/// ```
#[macro_export]
macro_rules! state_enum {
    ($($body:tt)*) => {
        $crate::__symbol_enum! { $crate::core::State; $($body)* }
    };
}

/// Declare an event enum and implement [`Event`](crate::core::Event) for it.
///
/// ```
/// use automaton::core::Event;
/// use automaton::event_enum;
///
/// event_enum! {
///     pub enum Button { Ok, Cancel }
/// }
///
/// assert_eq!(Button::Cancel.name(), "Cancel");
/// assert_eq!(Button::ALL.len(), 2);
/// ```
#[macro_export]
macro_rules! event_enum {
    ($($body:tt)*) => {
        $crate::__symbol_enum! { $crate::core::Event; $($body)* }
    };
}

#[cfg(test)]
mod tests {
    use crate::core::{Event, State};

    state_enum! {
        enum TestState {
            Initial,
            Processing,
            Complete,
        }
    }

    event_enum! {
        /// Events with attributes.
        pub enum TestEvent {
            #[allow(dead_code)]
            Start,
            Stop,
        }
    }

    #[test]
    fn state_enum_macro_generates_trait() {
        assert_eq!(TestState::Initial.name(), "Initial");
        assert_eq!(TestState::Complete.name(), "Complete");
        assert_eq!(TestState::Processing.to_string(), "Processing");
    }

    #[test]
    fn event_enum_macro_generates_trait() {
        assert_eq!(TestEvent::Start.name(), "Start");
        assert_eq!(TestEvent::Stop.to_string(), "Stop");
    }

    #[test]
    fn all_lists_variants_in_order() {
        assert_eq!(
            TestState::ALL,
            &[TestState::Initial, TestState::Processing, TestState::Complete]
        );
        assert_eq!(TestEvent::ALL, &[TestEvent::Start, TestEvent::Stop]);
    }

    #[test]
    fn generated_enums_serialize() {
        let json = serde_json::to_string(&TestState::Processing).unwrap();
        assert_eq!(json, "\"Processing\"");
        let back: TestState = serde_json::from_str(&json).unwrap();
        assert_eq!(back, TestState::Processing);
    }
}
