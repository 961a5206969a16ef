use std::fmt::Display;
use std::str::FromStr;

use miette::Diagnostic;
use thiserror::Error;

use crate::lexer;

macro_rules! conditions {
    ($($name:ident = $canonical:literal ,)*) => {
        /// Named boolean conditions of BL.
        #[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
        pub enum Condition {
            $($name,)*
        }

        impl Condition {
            pub const ALL: &'static [Condition] = &[$(Condition::$name,)*];

            /// Canonical upper-case, underscore-separated name.
            pub fn name(self) -> &'static str {
                match self {
                    $(Condition::$name => $canonical,)*
                }
            }
        }

        impl FromStr for Condition {
            type Err = UnknownCondition;
            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $($canonical => Ok(Condition::$name),)*
                    _ => Err(UnknownCondition(s.to_string())),
                }
            }
        }
    };
}

conditions! {
    NextIsEmpty = "NEXT_IS_EMPTY",
    NextIsNotEmpty = "NEXT_IS_NOT_EMPTY",
    NextIsWall = "NEXT_IS_WALL",
    NextIsNotWall = "NEXT_IS_NOT_WALL",
    NextIsFriend = "NEXT_IS_FRIEND",
    NextIsNotFriend = "NEXT_IS_NOT_FRIEND",
    NextIsEnemy = "NEXT_IS_ENEMY",
    NextIsNotEnemy = "NEXT_IS_NOT_ENEMY",
    Random = "RANDOM",
    True = "TRUE",
}

#[derive(Error, Diagnostic, Debug, Clone, PartialEq)]
#[error("Unknown condition: {0}")]
pub struct UnknownCondition(pub String);

impl Condition {
    /// Converts a condition token (`next-is-empty`) into its `Condition`.
    ///
    /// `raw` must satisfy `lexer::is_condition`; anything else is only caught here if it also
    /// fails to canonicalize to a known name.
    pub fn translate(raw: &str) -> Result<Condition, UnknownCondition> {
        debug_assert!(lexer::is_condition(raw), "{raw:?} is not a condition string");
        raw.replace('-', "_").to_uppercase().parse()
    }

    /// Token form, as written in BL source: lower-case and hyphen-separated.
    pub fn as_token(self) -> String {
        self.name().replace('_', "-").to_lowercase()
    }
}

impl Display for Condition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn translate_canonicalizes() {
        assert_eq!(Ok(Condition::NextIsNotEnemy), Condition::translate("next-is-not-enemy"));
        assert_eq!(Ok(Condition::True), Condition::translate("true"));
        assert_eq!("NEXT_IS_NOT_ENEMY", Condition::NextIsNotEnemy.to_string());
    }

    #[test]
    fn lexicon_and_enum_agree() {
        for raw in lexer::CONDITIONS {
            let c = Condition::translate(raw).expect("condition in lexicon has no variant");
            assert_eq!(*raw, c.as_token());
        }
        assert_eq!(lexer::CONDITIONS.len(), Condition::ALL.len());
    }

    #[test]
    fn canonical_names_only() {
        assert_eq!(
            Err(UnknownCondition("next-is-empty".to_string())),
            "next-is-empty".parse::<Condition>()
        );
        assert_eq!(Ok(Condition::Random), "RANDOM".parse::<Condition>());
    }
}
