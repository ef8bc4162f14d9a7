//! Macros for declaring state enumerations.

/// Generate a state enum and its State trait implementation.
///
/// The enum derives everything `State` requires, and `variants()` lists
/// the variants in declaration order. `Display` prints the variant name.
/// Fieldless variants only.
///
/// # Example
///
/// ```
/// use verdict::core::State;
/// use verdict::state_enum;
///
/// state_enum! {
///     pub enum Job {
///         Queued,
///         Running,
///         Done,
///         Failed,
///     }
///     final: [Done, Failed]
///     error: [Failed]
/// }
///
/// assert_eq!(Job::variants(), vec![Job::Queued, Job::Running, Job::Done, Job::Failed]);
/// assert!(Job::Failed.is_error());
/// assert_eq!(Job::Running.to_string(), "Running");
/// ```
#[macro_export]
macro_rules! state_enum {
    (
        $(#[$meta:meta])*
        $vis:vis enum $name:ident {
            $(
                $(#[$variant_meta:meta])*
                $variant:ident
            ),* $(,)?
        }

        $(final: [$($final:ident),* $(,)?])?
        $(error: [$($error:ident),* $(,)?])?
    ) => {
        $(#[$meta])*
        #[derive(Clone, PartialEq, Eq, Hash, Debug, serde::Serialize, serde::Deserialize)]
        $vis enum $name {
            $(
                $(#[$variant_meta])*
                $variant
            ),*
        }

        impl $crate::core::State for $name {
            fn name(&self) -> &str {
                match self {
                    $(Self::$variant => stringify!($variant)),*
                }
            }

            fn variants() -> Vec<Self> {
                vec![$(Self::$variant),*]
            }

            fn is_final(&self) -> bool {
                match self {
                    $($(Self::$final => true,)*)?
                    _ => false,
                }
            }

            fn is_error(&self) -> bool {
                match self {
                    $($(Self::$error => true,)*)?
                    _ => false,
                }
            }
        }

        impl ::std::fmt::Display for $name {
            fn fmt(&self, f: &mut ::std::fmt::Formatter<'_>) -> ::std::fmt::Result {
                f.write_str($crate::core::State::name(self))
            }
        }
    };
}
