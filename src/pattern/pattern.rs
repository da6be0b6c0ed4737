// Mon Oct 19 2026 - Alex

use crate::engine::EngineError;
use bitflags::bitflags;
use std::fmt;

bitflags! {
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct PatternFlags: u32 {
        const CASELESS = 1;
        const DOTALL = 2;
        const MULTILINE = 4;
        const SINGLEMATCH = 8;
        const ALLOWEMPTY = 16;
        const UTF8 = 32;
        const UCP = 64;
        const PREFILTER = 128;
        const SOM_LEFTMOST = 256;
        const COMBINATION = 512;
        const QUIET = 1024;
    }
}

impl PatternFlags {
    pub fn from_chars(flags: &str) -> Result<Self, EngineError> {
        let mut parsed = PatternFlags::empty();
        for c in flags.chars() {
            parsed |= match c {
                'i' => PatternFlags::CASELESS,
                's' => PatternFlags::DOTALL,
                'm' => PatternFlags::MULTILINE,
                'H' => PatternFlags::SINGLEMATCH,
                'V' => PatternFlags::ALLOWEMPTY,
                '8' => PatternFlags::UTF8,
                'W' => PatternFlags::UCP,
                'P' => PatternFlags::PREFILTER,
                'L' => PatternFlags::SOM_LEFTMOST,
                'C' => PatternFlags::COMBINATION,
                'Q' => PatternFlags::QUIET,
                other => {
                    return Err(EngineError::Syntax(format!("unknown pattern flag '{}'", other)))
                }
            };
        }
        Ok(parsed)
    }

    pub fn to_chars(self) -> String {
        const ORDER: [(PatternFlags, char); 11] = [
            (PatternFlags::CASELESS, 'i'),
            (PatternFlags::MULTILINE, 'm'),
            (PatternFlags::DOTALL, 's'),
            (PatternFlags::SINGLEMATCH, 'H'),
            (PatternFlags::ALLOWEMPTY, 'V'),
            (PatternFlags::UTF8, '8'),
            (PatternFlags::UCP, 'W'),
            (PatternFlags::PREFILTER, 'P'),
            (PatternFlags::SOM_LEFTMOST, 'L'),
            (PatternFlags::COMBINATION, 'C'),
            (PatternFlags::QUIET, 'Q'),
        ];

        ORDER
            .iter()
            .filter(|(flag, _)| self.contains(*flag))
            .map(|(_, c)| *c)
            .collect()
    }
}

/// A single regular expression together with its flags and identifier.
///
/// Accepts either a bare expression (`foo.*bar`) or the delimited form
/// `/expression/flags`, where the last `/` closes the expression. The
/// delimited form may carry a numeric `id:` prefix; it is dropped, since ids
/// always come from the pattern's position in its set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pattern {
    id: usize,
    expression: String,
    flags: PatternFlags,
    text: String,
}

impl Pattern {
    pub fn new(expression: impl Into<String>, flags: PatternFlags) -> Self {
        let expression = expression.into();
        let text = if flags.is_empty() {
            expression.clone()
        } else {
            format!("/{}/{}", expression, flags.to_chars())
        };

        Self {
            id: 0,
            expression,
            flags,
            text,
        }
    }

    pub fn parse(text: &str) -> Result<Self, EngineError> {
        if text.is_empty() {
            return Err(EngineError::Syntax("empty expression".to_string()));
        }

        let body = strip_id_prefix(text);
        let (expression, flags) = match body.strip_prefix('/') {
            Some(rest) => match rest.rfind('/') {
                Some(end) => (&rest[..end], PatternFlags::from_chars(&rest[end + 1..])?),
                None => (body, PatternFlags::empty()),
            },
            None => (body, PatternFlags::empty()),
        };

        if expression.is_empty() {
            return Err(EngineError::Syntax("empty expression".to_string()));
        }

        Ok(Self {
            id: 0,
            expression: expression.to_string(),
            flags,
            text: text.to_string(),
        })
    }

    pub fn with_id(mut self, id: usize) -> Self {
        self.id = id;
        self
    }

    pub fn id(&self) -> usize {
        self.id
    }

    pub fn expression(&self) -> &str {
        &self.expression
    }

    pub fn flags(&self) -> PatternFlags {
        self.flags
    }

    /// The string this pattern was parsed from.
    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn has_flag(&self, flag: PatternFlags) -> bool {
        self.flags.contains(flag)
    }
}

fn strip_id_prefix(text: &str) -> &str {
    match text.split_once(":/") {
        Some((id, rest)) if !id.is_empty() && id.bytes().all(|b| b.is_ascii_digit()) => &text[id.len() + 1..],
        _ => text,
    }
}

impl fmt::Display for Pattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.id, self.text)
    }
}
