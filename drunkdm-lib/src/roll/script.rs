use super::Source;
use crate::error::Error;
use crate::error::Result;

/// Source replaying a fixed sequence of values, for reproducible rolls
#[derive(Debug, Clone)]
pub struct ScriptedSource {
    values: Vec<u64>,
    cursor: usize,
}

impl ScriptedSource {
    pub fn new<I: IntoIterator<Item = u64>>(values: I) -> Self {
        ScriptedSource {
            values: values.into_iter().collect(),
            cursor: 0,
        }
    }

    /// Amount of values handed out so far
    pub fn drawn(&self) -> usize {
        self.cursor
    }

    pub fn remaining(&self) -> usize {
        self.values.len() - self.cursor
    }
}

impl Source for ScriptedSource {
    fn next_int(&mut self, min: u64, max: u64) -> Result<u64> {
        if min > max {
            return Err(Error::Range { min, max });
        }
        let value = *self.values.get(self.cursor).ok_or(Error::Exhausted {
            drawn: self.cursor,
        })?;
        if !(min..=max).contains(&value) {
            return Err(Error::Unscripted { value, min, max });
        }
        self.cursor += 1;
        Ok(value)
    }
}
