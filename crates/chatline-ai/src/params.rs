//! Generation parameters and their runtime text commands.

use std::fmt;
use std::num::{ParseFloatError, ParseIntError};
use std::str::FromStr;

/// Parameters sent with every request.
///
/// Values are not range-checked. Whatever parses is forwarded to the API,
/// which rejects what it does not accept.
#[derive(Debug, Clone, PartialEq)]
pub struct Parameters {
    pub model: String,
    pub max_tokens: i32,
    pub count: i32,
    pub temperature: f64,
    pub top_p: f64,
    pub presence_penalty: f64,
    pub frequency_penalty: f64,
}

impl Default for Parameters {
    fn default() -> Self {
        Self {
            model: "text-davinci-003".to_string(),
            max_tokens: 1024,
            count: 1,
            temperature: 0.7,
            top_p: 1.0,
            presence_penalty: 0.0,
            frequency_penalty: 0.0,
        }
    }
}

/// A parameter addressable by name from the interactive prompt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Parameter {
    Model,
    Tokens,
    Count,
    Temp,
    TopP,
    Pres,
    Freq,
}

impl Parameter {
    pub const ALL: [Parameter; 7] = [
        Parameter::Model,
        Parameter::Tokens,
        Parameter::Count,
        Parameter::Temp,
        Parameter::TopP,
        Parameter::Pres,
        Parameter::Freq,
    ];

    /// Command token, e.g. `topp`.
    pub fn name(self) -> &'static str {
        match self {
            Parameter::Model => "model",
            Parameter::Tokens => "tokens",
            Parameter::Count => "count",
            Parameter::Temp => "temp",
            Parameter::TopP => "topp",
            Parameter::Pres => "pres",
            Parameter::Freq => "freq",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|p| p.name() == name)
    }
}

impl fmt::Display for Parameter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParamError {
    #[error("invalid integer {value:?} for {param}: {source}")]
    Integer {
        param: Parameter,
        value: String,
        #[source]
        source: ParseIntError,
    },
    #[error("invalid number {value:?} for {param}: {source}")]
    Float {
        param: Parameter,
        value: String,
        #[source]
        source: ParseFloatError,
    },
}

impl Parameters {
    /// Current value of `param`, formatted for display.
    pub fn get(&self, param: Parameter) -> String {
        match param {
            Parameter::Model => self.model.clone(),
            Parameter::Tokens => self.max_tokens.to_string(),
            Parameter::Count => self.count.to_string(),
            Parameter::Temp => self.temperature.to_string(),
            Parameter::TopP => self.top_p.to_string(),
            Parameter::Pres => self.presence_penalty.to_string(),
            Parameter::Freq => self.frequency_penalty.to_string(),
        }
    }

    /// Parse `raw` for `param` and assign it. On error nothing changes.
    pub fn set(&mut self, param: Parameter, raw: &str) -> Result<(), ParamError> {
        match param {
            Parameter::Model => self.model = raw.to_string(),
            Parameter::Tokens => self.max_tokens = parse_int(param, raw)?,
            Parameter::Count => self.count = parse_int(param, raw)?,
            Parameter::Temp => self.temperature = parse_float(param, raw)?,
            Parameter::TopP => self.top_p = parse_float(param, raw)?,
            Parameter::Pres => self.presence_penalty = parse_float(param, raw)?,
            Parameter::Freq => self.frequency_penalty = parse_float(param, raw)?,
        }
        Ok(())
    }
}

fn parse_int(param: Parameter, raw: &str) -> Result<i32, ParamError> {
    i32::from_str(raw).map_err(|source| ParamError::Integer {
        param,
        value: raw.to_string(),
        source,
    })
}

fn parse_float(param: Parameter, raw: &str) -> Result<f64, ParamError> {
    f64::from_str(raw).map_err(|source| ParamError::Float {
        param,
        value: raw.to_string(),
        source,
    })
}
