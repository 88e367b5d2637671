//! Slash commands that run the toolkit directly, without the model.

use mentor_compute::solve::solve;
use mentor_error::Error;
use mentor_tools::{
    evaluate::{evaluate_expr, Evaluated},
    hint::hints_for,
    transform::{expand_expr, factor_expr, simplify_expr},
    verify::review,
};

/// Separates the two arguments of commands that take a second one.
const SEPARATOR: char = '|';

pub const HELP: &str = "\
Commands (run offline, without the tutor):
  /calc <expression>               evaluate, e.g. /calc sqrt(16) + 2
  /solve <equations> [| <vars>]    solve, e.g. /solve x + y = 10, x - y = 2 | x, y
  /simplify <expression>           simplify, e.g. /simplify 2x + 3x
  /expand <expression>             expand, e.g. /expand (x + 1)^2
  /factor <expression>             factor, e.g. /factor x^2 - 4
  /hint <problem> [| <attempt>]    Socratic hints, e.g. /hint 2x + 5 = 13 | x = 3
  /verify <problem> | <work>       check a worked example, e.g. /verify 2x = 10 | x = 5
  /help                            show this message";

/// A parsed slash command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command<'a> {
    Calc(&'a str),
    Solve { equations: &'a str, variables: Option<&'a str> },
    Simplify(&'a str),
    Expand(&'a str),
    Factor(&'a str),
    Hint { problem: &'a str, last_attempt: Option<&'a str> },
    Verify { problem: &'a str, work: &'a str },
    Help,
}

/// Splits `first | second` into its trimmed parts.
fn split_args(args: &str) -> (&str, Option<&str>) {
    match args.split_once(SEPARATOR) {
        Some((first, second)) => (first.trim(), Some(second.trim()).filter(|s| !s.is_empty())),
        None => (args.trim(), None),
    }
}

impl<'a> Command<'a> {
    /// Parses a line starting with `/`. Returns an error message for unknown commands and missing
    /// arguments.
    pub fn parse(line: &'a str) -> Result<Self, String> {
        let line = line.trim();
        let (name, args) = line.split_once(char::is_whitespace).unwrap_or((line, ""));
        let args = args.trim();

        let command = match name {
            "/help" => return Ok(Self::Help),
            "/calc" => Self::Calc(args),
            "/simplify" => Self::Simplify(args),
            "/expand" => Self::Expand(args),
            "/factor" => Self::Factor(args),
            "/solve" => {
                let (equations, variables) = split_args(args);
                Self::Solve { equations, variables }
            },
            "/hint" => {
                let (problem, last_attempt) = split_args(args);
                Self::Hint { problem, last_attempt }
            },
            "/verify" => match split_args(args) {
                (problem, Some(work)) => Self::Verify { problem, work },
                _ => return Err("usage: /verify <problem> | <work>".to_string()),
            },
            _ => return Err(format!("unknown command `{}`; type /help for the list", name)),
        };

        if command.input().is_empty() {
            return Err(format!("`{}` needs an argument; type /help for usage", name));
        }
        Ok(command)
    }

    /// The text the command parses, which error reports point into.
    pub fn input(&self) -> &'a str {
        match self {
            Self::Calc(input)
            | Self::Simplify(input)
            | Self::Expand(input)
            | Self::Factor(input) => *input,
            Self::Solve { equations, .. } => *equations,
            Self::Hint { problem, .. } | Self::Verify { problem, .. } => *problem,
            Self::Help => "",
        }
    }

    /// Runs the command, returning the lines to print.
    pub fn execute(&self) -> Result<Vec<String>, Error> {
        let lines = match self {
            Self::Calc(input) => match evaluate_expr(input)? {
                Evaluated::Number(value) => vec![value],
                Evaluated::Symbolic(expr) => vec![expr],
            },
            Self::Solve { equations, variables } => vec![solve(equations, *variables)?.to_string()],
            Self::Simplify(input) => {
                let forms = simplify_expr(input)?;
                let mut lines = forms.steps();
                lines.push(forms.simplified);
                if !forms.rules.is_empty() {
                    let rules = forms.rules.iter().map(ToString::to_string).collect::<Vec<_>>();
                    lines.push(format!("Rules used: {}", rules.join(", ")));
                }
                lines
            },
            Self::Expand(input) => vec![expand_expr(input)?],
            Self::Factor(input) => vec![factor_expr(input)?],
            Self::Hint { problem, last_attempt } => hints_for(problem, *last_attempt)
                .into_iter()
                .map(|hint| format!("• {}", hint))
                .collect(),
            Self::Verify { problem, work } => {
                // accept `;` between lines, since the prompt reads one line
                let work = work.replace(';', "\n");
                let feedback = review(problem, &work);
                if feedback.is_empty() {
                    vec!["Nothing to check yet; show your work".to_string()]
                } else {
                    feedback
                }
            },
            Self::Help => HELP.lines().map(str::to_string).collect(),
        };
        Ok(lines)
    }
}

/// Runs a slash command, printing its output, or its error report to stderr.
pub fn run(line: &str) {
    let command = match Command::parse(line) {
        Ok(command) => command,
        Err(msg) => {
            eprintln!("{}", msg);
            return;
        },
    };

    match command.execute() {
        Ok(lines) => lines.iter().for_each(|line| println!("{}", line)),
        Err(err) => err.report_to_stderr(command.input()),
    }
}

#[cfg(test)]
mod tests {
    use mentor_error::ErrorCategory;
    use pretty_assertions::assert_eq;
    use super::*;

    #[test]
    fn parse_commands() {
        assert_eq!(Command::parse("/calc 7 * 8"), Ok(Command::Calc("7 * 8")));
        assert_eq!(
            Command::parse("/solve x + y = 10, x - y = 2 | x, y"),
            Ok(Command::Solve { equations: "x + y = 10, x - y = 2", variables: Some("x, y") }),
        );
        assert_eq!(
            Command::parse("/solve 2x = 10 |"),
            Ok(Command::Solve { equations: "2x = 10", variables: None }),
        );
        assert_eq!(
            Command::parse("/hint 2x + 5 = 13"),
            Ok(Command::Hint { problem: "2x + 5 = 13", last_attempt: None }),
        );
        assert_eq!(Command::parse("  /help  "), Ok(Command::Help));
    }

    #[test]
    fn bad_commands() {
        assert!(Command::parse("/integrate x").unwrap_err().contains("unknown command `/integrate`"));
        assert!(Command::parse("/calc").unwrap_err().contains("needs an argument"));
        assert!(Command::parse("/verify 2x = 10").unwrap_err().starts_with("usage"));
    }

    #[test]
    fn execute_commands() {
        let run = |line| Command::parse(line).unwrap().execute().unwrap();
        assert_eq!(run("/calc 2 + 3 * 4"), vec!["14"]);
        assert_eq!(run("/solve x^2 - 4 = 0"), vec!["x = -2, x = 2"]);
        assert_eq!(run("/solve x + y = 10, x - y = 2 | x, y"), vec!["x = 6, y = 4"]);
        assert_eq!(run("/expand (x + 1)^2"), vec!["x^2 + 2*x + 1"]);
        assert_eq!(run("/factor x^2 - 4"), vec!["(x - 2)*(x + 2)"]);
        let simplified = run("/simplify 2x + 3x");
        assert_eq!(simplified[..2].to_vec(), vec!["Expanded: 5*x", "5*x"]);
        assert!(simplified[2].starts_with("Rules used: "));
        assert!(simplified[2].contains("combine like terms"));
        assert_eq!(run("/simplify x + 1"), vec!["x + 1"]);
        assert_eq!(run("/hint what is 3 + 4"), vec!["• Try combining like terms first."]);
        assert!(run("/verify 2x = 10 | 2x = 10; x = 5")
            .iter()
            .any(|line| line.contains("Final answer found")));
    }

    #[test]
    fn errors_point_into_the_input() {
        let command = Command::parse("/calc (1 + 2").unwrap();
        let err = command.execute().unwrap_err();
        assert_eq!(err.category(), ErrorCategory::Parse);
        assert!(err.spans.iter().all(|span| span.end <= command.input().len()));
    }
}
