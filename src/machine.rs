//! Machine descriptions and the input line parser.
//!
//! One input line describes one machine: an optional indicator-light
//! pattern `[.##.]`, a counter target section `{3,5,4,7}`, and one or
//! more button wiring sections like `(0,2)`.

use std::error;
use std::fmt::{self, Display};

use once_cell::sync::Lazy;
use regex::Regex;

/// Failure to parse a machine description line.
///
/// Parsing is all-or-nothing: a malformed line aborts input loading
/// rather than producing a partial machine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    /// The line has no `{..}` counter target section.
    MissingTargets,
    /// The line has no `(..)` button section.
    NoButtons,
    /// A numeric field failed to parse.
    InvalidNumber(String),
    /// A button wires a counter index the machine does not have.
    IndexOutOfRange {
        button: usize,
        index: usize,
        limit: usize,
    },
}

impl Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseError::MissingTargets => {
                write!(f, "No counter target section ({{n,n,...}}) in line.")
            }
            ParseError::NoButtons => write!(f, "No button section ((n,n,...)) in line."),
            ParseError::InvalidNumber(text) => write!(f, "Invalid number({}) in line.", text),
            ParseError::IndexOutOfRange {
                button,
                index,
                limit,
            } => write!(
                f,
                "Button {} wires index {}, outside the machine's {} slot(s).",
                button, index, limit
            ),
        }
    }
}

impl error::Error for ParseError {}

/// Counter indices a button increments by one each time it is pressed.
pub type Button = Vec<usize>;

/// One machine instance, fixed for its lifetime.
#[derive(Debug, Clone)]
pub struct Machine {
    lights: Option<Vec<bool>>,
    targets: Vec<u64>,
    buttons: Vec<Button>,
    /// `effects[counter][button]`, 1 when the button increments the counter.
    /// Derived from `buttons` once at construction.
    effects: Vec<Vec<u8>>,
}

impl Machine {
    /// Build a machine from already-parsed sections, validating that every
    /// wired index exists.
    pub fn new(
        lights: Option<Vec<bool>>,
        targets: Vec<u64>,
        buttons: Vec<Button>,
    ) -> Result<Self, ParseError> {
        for (button, wiring) in buttons.iter().enumerate() {
            for &index in wiring {
                if index >= targets.len() {
                    return Err(ParseError::IndexOutOfRange {
                        button,
                        index,
                        limit: targets.len(),
                    });
                }
                if let Some(lights) = &lights {
                    if index >= lights.len() {
                        return Err(ParseError::IndexOutOfRange {
                            button,
                            index,
                            limit: lights.len(),
                        });
                    }
                }
            }
        }

        let mut buttons = buttons;
        for wiring in &mut buttons {
            wiring.sort_unstable();
            wiring.dedup();
        }

        let effects = (0..targets.len())
            .map(|counter| {
                buttons
                    .iter()
                    .map(|wiring| u8::from(wiring.contains(&counter)))
                    .collect()
            })
            .collect();

        Ok(Self {
            lights,
            targets,
            buttons,
            effects,
        })
    }

    /// Parse one input line. Requires a target section and at least one
    /// button section; the light pattern is optional.
    pub fn parse(line: &str) -> Result<Self, ParseError> {
        static LIGHTS_PATTERN: Lazy<Regex> = Lazy::new(|| Regex::new(r"\[([.#]+)\]").unwrap());
        static TARGETS_PATTERN: Lazy<Regex> = Lazy::new(|| Regex::new(r"\{([0-9,]+)\}").unwrap());
        static BUTTON_PATTERN: Lazy<Regex> = Lazy::new(|| Regex::new(r"\(([0-9,]+)\)").unwrap());

        let lights = LIGHTS_PATTERN
            .captures(line)
            .map(|caps| caps[1].chars().map(|c| c == '#').collect());

        let targets = match TARGETS_PATTERN.captures(line) {
            Some(caps) => parse_numbers::<u64>(&caps[1])?,
            None => return Err(ParseError::MissingTargets),
        };

        let mut buttons = Vec::new();
        for caps in BUTTON_PATTERN.captures_iter(line) {
            buttons.push(parse_numbers::<usize>(&caps[1])?);
        }
        if buttons.is_empty() {
            return Err(ParseError::NoButtons);
        }

        Self::new(lights, targets, buttons)
    }

    pub fn lights(&self) -> Option<&[bool]> {
        self.lights.as_deref()
    }

    pub fn targets(&self) -> &[u64] {
        &self.targets
    }

    pub fn buttons(&self) -> &[Button] {
        &self.buttons
    }

    pub fn counter_count(&self) -> usize {
        self.targets.len()
    }

    pub fn button_count(&self) -> usize {
        self.buttons.len()
    }

    /// Whether pressing `button` increments `counter`.
    pub fn affects(&self, counter: usize, button: usize) -> bool {
        self.effects[counter][button] == 1
    }

    /// The largest single counter target, a lower bound on total presses.
    pub fn max_target(&self) -> u64 {
        self.targets.iter().copied().max().unwrap_or(0)
    }

    /// The sum of all counter targets, an upper bound on total presses.
    pub fn sum_targets(&self) -> u64 {
        self.targets.iter().sum()
    }
}

fn parse_numbers<T: std::str::FromStr>(text: &str) -> Result<Vec<T>, ParseError> {
    text.split(',')
        .map(|field| {
            field
                .parse::<T>()
                .map_err(|_| ParseError::InvalidNumber(field.to_string()))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_full_line() {
        let machine = Machine::parse("[.##.] (0,2) (1,3) {3,5,4,7}").unwrap();

        assert_eq!(machine.lights(), Some(&[false, true, true, false][..]));
        assert_eq!(machine.targets(), &[3, 5, 4, 7]);
        assert_eq!(machine.buttons(), &[vec![0, 2], vec![1, 3]]);
        assert!(machine.affects(0, 0));
        assert!(!machine.affects(1, 0));
        assert!(machine.affects(3, 1));
    }

    #[test]
    fn test_parse_without_lights() {
        let machine = Machine::parse("(0) (0,1) {2,3}").unwrap();

        assert!(machine.lights().is_none());
        assert_eq!(machine.targets(), &[2, 3]);
        assert_eq!(machine.button_count(), 2);
    }

    #[test]
    fn test_parse_missing_targets() {
        assert_eq!(
            Machine::parse("[.#] (0,1)").unwrap_err(),
            ParseError::MissingTargets
        );
    }

    #[test]
    fn test_parse_no_buttons() {
        assert_eq!(
            Machine::parse("[.#] {1,2}").unwrap_err(),
            ParseError::NoButtons
        );
    }

    #[test]
    fn test_parse_index_out_of_range() {
        assert_eq!(
            Machine::parse("(0,5) {1,2}").unwrap_err(),
            ParseError::IndexOutOfRange {
                button: 0,
                index: 5,
                limit: 2,
            }
        );
    }

    #[test]
    fn test_duplicate_wiring_collapses() {
        let machine = Machine::new(None, vec![4], vec![vec![0, 0]]).unwrap();

        assert_eq!(machine.buttons(), &[vec![0]]);
    }

    #[test]
    fn test_bounds() {
        let machine = Machine::parse("(0) {2,3}").unwrap();

        assert_eq!(machine.max_target(), 3);
        assert_eq!(machine.sum_targets(), 5);
    }
}
