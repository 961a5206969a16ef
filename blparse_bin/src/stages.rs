use std::fmt::Display;
use std::str::FromStr;

macro_rules! stages {
($($name:ident = $val:literal ,)*) => {

/// How far to run before printing. Later stages win when several are passed.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Ord, PartialOrd)]
pub enum Stages {
    $($name,)*
}
use Stages::*;

impl FromStr for Stages {
    type Err = ();
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            $($val => Ok($name),)*
            _ => Err(()),
        }
    }
}

impl Display for Stages {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            $($name => write!(f, $val),)*
        }
    }
}

pub fn print_help() {
    println!(
        "blparse [{{{}}}] [--single] <file.bl>",
        [$($name,)*]
            .iter()
            .map(|stage| format!("--{}", stage))
            .collect::<Vec<_>>()
            .join(", ")
    );
}
};
}

stages! {
    Lex = "lex",
    Parse = "parse",
    Render = "render",
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn round_trips_names() {
        for stage in [Stages::Lex, Stages::Parse, Stages::Render] {
            assert_eq!(Ok(stage), stage.to_string().parse());
        }
        assert_eq!(Err(()), "codegen".parse::<Stages>());
    }

    #[test]
    fn later_stage_is_greater() {
        assert!(Stages::Lex < Stages::Parse && Stages::Parse < Stages::Render);
    }
}
