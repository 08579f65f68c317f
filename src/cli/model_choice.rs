// Binary Arithmetic Coder: a context-adaptive arithmetic coding library
// Copyright (C) 2025  Yair Ziv
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
// GNU General Public License for more details.
//
// You should have received a copy of the GNU General Public License
// along with this program.  If not, see <https://www.gnu.org/licenses/>.

use bin_arith_coder::{ConstantModel, ContextFrequencyModel, ProbabilityModel};
use std::fmt::{Display, Formatter};
use std::str::FromStr;
use thiserror::Error;

/// Probability model the user selected on the command line, either a fixed
/// Bernoulli parameter (`constant:<p>`) or the builtin context-frequency
/// estimator (`context-freq`).
#[derive(Debug, Clone)]
pub enum ModelChoice {
    Constant(f64),
    ContextFreq,
}

#[derive(Debug, Error)]
pub enum ModelChoiceParseError {
    #[error("unrecognized model '{0}', expected 'constant:<p>' or 'context-freq'")]
    UnknownModel(String),
    #[error("invalid probability in 'constant:<p>': {0}")]
    BadProbability(std::num::ParseFloatError),
}

impl FromStr for ModelChoice {
    type Err = ModelChoiceParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s == "context-freq" {
            return Ok(ModelChoice::ContextFreq);
        }
        if let Some(p) = s.strip_prefix("constant:") {
            let p: f64 = p.parse().map_err(ModelChoiceParseError::BadProbability)?;
            return Ok(ModelChoice::Constant(p));
        }
        Err(ModelChoiceParseError::UnknownModel(s.to_string()))
    }
}

impl Display for ModelChoice {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            ModelChoice::Constant(p) => write!(f, "constant:{p}"),
            ModelChoice::ContextFreq => write!(f, "context-freq"),
        }
    }
}

/// A model is either genuinely stateless (`Constant`) or carries state an
/// encoder and decoder must each build independently (`ContextFreq`); this
/// enum dispatches `p1` to whichever the user picked without the caller
/// needing a trait object.
#[derive(Debug, Clone)]
pub enum DynModel {
    Constant(ConstantModel),
    ContextFreq(ContextFrequencyModel),
}

impl ProbabilityModel for DynModel {
    fn p1(&self, context: &[bool]) -> f64 {
        match self {
            DynModel::Constant(m) => m.p1(context),
            DynModel::ContextFreq(m) => m.p1(context),
        }
    }
}

impl ModelChoice {
    pub fn build(&self) -> DynModel {
        match self {
            ModelChoice::Constant(p) => DynModel::Constant(ConstantModel(*p)),
            ModelChoice::ContextFreq => DynModel::ContextFreq(ContextFrequencyModel),
        }
    }
}
