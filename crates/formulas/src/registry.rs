//! Name-based function lookup and dispatch.

use std::collections::HashMap;

use cellcalc_primitives::{CellAddress, ErrorKind, Eval};
use serde::{Deserialize, Serialize};

use crate::functions::{date, finance, logical, lookup, math, stats, text};
use crate::operand::MAX_OPERANDS;
use crate::{FormulaError, FunctionImpl};

/// Dispatch settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineOptions {
    /// Invocations with more operands than this evaluate to `#VALUE!`.
    pub max_operands: usize,
}

impl Default for EngineOptions {
    fn default() -> Self {
        Self {
            max_operands: MAX_OPERANDS,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FunctionFamily {
    Logical,
    Lookup,
    Text,
    Date,
    Financial,
    Statistical,
    Math,
}

/// Function definition
#[derive(Clone, Copy)]
pub struct FunctionDefinition {
    pub name: &'static str,
    pub family: FunctionFamily,
    pub min_args: usize,
    pub max_args: Option<usize>,
    pub eval: FunctionImpl,
}

impl FunctionDefinition {
    /// Fixed number of arguments
    pub fn fixed(
        name: &'static str,
        family: FunctionFamily,
        args: usize,
        eval: FunctionImpl,
    ) -> Self {
        Self::range(name, family, args, args, eval)
    }

    /// Range of arguments
    pub fn range(
        name: &'static str,
        family: FunctionFamily,
        min: usize,
        max: usize,
        eval: FunctionImpl,
    ) -> Self {
        Self {
            name,
            family,
            min_args: min,
            max_args: Some(max),
            eval,
        }
    }

    /// Variable number of arguments, bounded only by the engine options
    pub fn variadic(
        name: &'static str,
        family: FunctionFamily,
        min: usize,
        eval: FunctionImpl,
    ) -> Self {
        Self {
            name,
            family,
            min_args: min,
            max_args: None,
            eval,
        }
    }

    pub fn accepts(&self, provided: usize) -> bool {
        provided >= self.min_args && self.max_args.map_or(true, |max| provided <= max)
    }

    pub fn expected_args_label(&self) -> String {
        match self.max_args {
            Some(max) if max == self.min_args => format!("{}", self.min_args),
            Some(max) => format!("{}..{}", self.min_args, max),
            None => format!("{}+", self.min_args),
        }
    }
}

/// Registry of available functions
#[derive(Clone)]
pub struct FunctionRegistry {
    functions: HashMap<String, FunctionDefinition>,
    options: EngineOptions,
}

impl Default for FunctionRegistry {
    fn default() -> Self {
        Self::with_options(EngineOptions::default())
    }
}

impl FunctionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_options(options: EngineOptions) -> Self {
        let mut registry = Self {
            functions: HashMap::new(),
            options,
        };
        registry.register_standard_functions();
        registry
    }

    fn register_standard_functions(&mut self) {
        use FunctionDefinition as Def;
        use FunctionFamily::{Date, Financial, Logical, Lookup, Math, Statistical, Text};

        let definitions = [
            // Logical
            Def::variadic("AND", Logical, 1, logical::and),
            Def::variadic("OR", Logical, 1, logical::or),
            Def::fixed("NOT", Logical, 1, logical::not),
            Def::range("IF", Logical, 2, 3, logical::if_),
            Def::fixed("TRUE", Logical, 0, logical::true_),
            Def::fixed("FALSE", Logical, 0, logical::false_),
            Def::fixed("ISBLANK", Logical, 1, logical::isblank),
            Def::fixed("ISNUMBER", Logical, 1, logical::isnumber),
            Def::fixed("ISTEXT", Logical, 1, logical::istext),
            Def::fixed("ISNONTEXT", Logical, 1, logical::isnontext),
            Def::fixed("ISLOGICAL", Logical, 1, logical::islogical),
            Def::fixed("ISERROR", Logical, 1, logical::iserror),
            Def::fixed("ISERR", Logical, 1, logical::iserr),
            Def::fixed("ISNA", Logical, 1, logical::isna),
            // Lookup
            Def::range("MATCH", Lookup, 2, 3, lookup::match_),
            Def::fixed("COUNTIF", Lookup, 2, lookup::countif),
            // Text
            Def::fixed("LEN", Text, 1, text::len),
            Def::fixed("TRIM", Text, 1, text::trim),
            Def::fixed("UPPER", Text, 1, text::upper),
            Def::fixed("LOWER", Text, 1, text::lower),
            Def::fixed("EXACT", Text, 2, text::exact),
            Def::variadic("CONCATENATE", Text, 1, text::concatenate),
            Def::range("LEFT", Text, 1, 2, text::left),
            Def::range("RIGHT", Text, 1, 2, text::right),
            Def::fixed("MID", Text, 3, text::mid),
            Def::fixed("REPLACE", Text, 4, text::replace),
            Def::range("SUBSTITUTE", Text, 3, 4, text::substitute),
            // Date
            Def::fixed("DATE", Date, 3, date::date),
            Def::fixed("YEAR", Date, 1, date::year),
            Def::fixed("MONTH", Date, 1, date::month),
            Def::fixed("DAY", Date, 1, date::day),
            // Financial
            Def::range("FV", Financial, 3, 5, finance::fv),
            Def::range("PV", Financial, 3, 5, finance::pv),
            Def::range("PMT", Financial, 3, 5, finance::pmt),
            Def::range("NPER", Financial, 3, 5, finance::nper),
            Def::variadic("NPV", Financial, 2, finance::npv),
            // Statistical
            Def::variadic("SUM", Statistical, 1, stats::sum),
            Def::variadic("SUMSQ", Statistical, 1, stats::sumsq),
            Def::variadic("PRODUCT", Statistical, 1, stats::product),
            Def::variadic("AVERAGE", Statistical, 1, stats::average),
            Def::variadic("MIN", Statistical, 1, stats::min),
            Def::variadic("MAX", Statistical, 1, stats::max),
            Def::variadic("MEDIAN", Statistical, 1, stats::median),
            Def::variadic("MODE", Statistical, 1, stats::mode),
            Def::variadic("STDEV", Statistical, 1, stats::stdev),
            Def::variadic("VAR", Statistical, 1, stats::var),
            Def::variadic("AVEDEV", Statistical, 1, stats::avedev),
            Def::variadic("DEVSQ", Statistical, 1, stats::devsq),
            Def::fixed("LARGE", Statistical, 2, stats::large),
            Def::fixed("SMALL", Statistical, 2, stats::small),
            Def::variadic("COUNT", Statistical, 1, stats::count),
            Def::variadic("COUNTA", Statistical, 1, stats::counta),
            Def::fixed("SUMX2MY2", Statistical, 2, stats::sumx2my2),
            Def::fixed("SUMX2PY2", Statistical, 2, stats::sumx2py2),
            Def::fixed("SUMXMY2", Statistical, 2, stats::sumxmy2),
            // Math
            Def::fixed("ABS", Math, 1, math::abs),
            Def::fixed("EVEN", Math, 1, math::even),
            Def::fixed("ODD", Math, 1, math::odd),
            Def::fixed("INT", Math, 1, math::int),
            Def::fixed("SIGN", Math, 1, math::sign),
            Def::fixed("SQRT", Math, 1, math::sqrt),
            Def::fixed("EXP", Math, 1, math::exp),
            Def::fixed("LN", Math, 1, math::ln),
            Def::fixed("LOG10", Math, 1, math::log10),
            Def::fixed("FACT", Math, 1, math::fact),
            Def::fixed("PI", Math, 0, math::pi),
            Def::fixed("ROUND", Math, 2, math::round),
            Def::fixed("ROUNDUP", Math, 2, math::roundup),
            Def::fixed("ROUNDDOWN", Math, 2, math::rounddown),
            Def::fixed("MOD", Math, 2, math::mod_),
            Def::fixed("POWER", Math, 2, math::power),
        ];
        for def in definitions {
            self.register(def);
        }
    }

    /// Add or replace a function. Names are matched case-insensitively.
    pub fn register(&mut self, def: FunctionDefinition) {
        self.functions.insert(def.name.to_uppercase(), def);
    }

    /// Check if a function exists
    pub fn has_function(&self, name: &str) -> bool {
        self.functions.contains_key(&name.to_uppercase())
    }

    /// Get a function definition by name
    pub fn get(&self, name: &str) -> Option<&FunctionDefinition> {
        self.functions.get(&name.to_uppercase())
    }

    /// Registered names, sorted.
    pub fn names(&self) -> Vec<&'static str> {
        let mut names: Vec<_> = self.functions.values().map(|def| def.name).collect();
        names.sort_unstable();
        names
    }

    pub fn options(&self) -> &EngineOptions {
        &self.options
    }

    /// Evaluate `name` for the formula in cell `(src_row, src_col)`.
    ///
    /// Only an unknown name is a Rust error; everything else, including an
    /// unexpected operand count, comes back as an [`Eval`].
    pub fn evaluate(
        &self,
        name: &str,
        operands: &[Eval],
        src_row: i32,
        src_col: i16,
    ) -> Result<Eval, FormulaError> {
        let Some(def) = self.get(name) else {
            tracing::warn!(function = name, "unknown function");
            return Err(FormulaError::UnknownFunction(name.to_string()));
        };
        tracing::debug!(
            function = def.name,
            operands = operands.len(),
            cell = %CellAddress::new(src_row, src_col),
            "evaluating"
        );
        if operands.len() > self.options.max_operands {
            return Ok(Eval::Error(ErrorKind::ValueInvalid));
        }
        if !def.accepts(operands.len()) {
            tracing::debug!(
                function = def.name,
                expected = %def.expected_args_label(),
                provided = operands.len(),
                "operand count outside declared arity"
            );
        }
        Ok((def.eval)(operands, src_row, src_col))
    }
}
