//! Symbol strings, rule sets and the generation loop.
//!
//! A [`RuleSet`] maps single symbols to replacement strings. Applying it once is
//! one parallel L-System derivation step: every symbol of the current string is
//! replaced left to right, and symbols without a rule are copied unchanged.
//!
//! # Growth
//!
//! Output length grows roughly as `k^generations` for a rule that expands one
//! symbol into `k`. Nothing in this module bounds it; callers should check
//! [`RuleSet::expanded_len`] before calling [`expand`] with untrusted input.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap, HashSet};
use std::fmt;

/// A single L-System symbol.
pub type Symbol = char;

/// An ordered sequence of [`Symbol`]s.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SymbolString(String);

impl SymbolString {
    /// An empty string.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty string with room for `capacity` bytes.
    pub fn with_capacity(capacity: usize) -> Self {
        Self(String::with_capacity(capacity))
    }

    /// The symbols as a plain string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Number of symbols (not bytes).
    pub fn len(&self) -> usize {
        self.0.chars().count()
    }

    /// True when the string holds no symbols.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterates over the symbols in order.
    pub fn symbols(&self) -> std::str::Chars<'_> {
        self.0.chars()
    }

    /// Appends one symbol.
    pub fn push(&mut self, symbol: Symbol) {
        self.0.push(symbol);
    }

    /// Appends every symbol of `other`.
    pub fn push_str(&mut self, other: &SymbolString) {
        self.0.push_str(&other.0);
    }

    /// Number of bytes held, used to pre-size rewrite buffers.
    fn byte_len(&self) -> usize {
        self.0.len()
    }
}

impl From<&str> for SymbolString {
    fn from(s: &str) -> Self {
        Self(s.to_owned())
    }
}

impl From<String> for SymbolString {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl FromIterator<Symbol> for SymbolString {
    fn from_iter<I: IntoIterator<Item = Symbol>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl fmt::Display for SymbolString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl PartialEq<&str> for SymbolString {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

/// Anything that can rewrite a symbol string into its next generation.
///
/// [`RuleSet`] is the usual implementation; closures work too, which makes it
/// easy to plug in context-sensitive or otherwise unusual grammars.
pub trait Rewrite {
    /// Produces the next generation of `symbols`.
    fn apply(&self, symbols: &SymbolString) -> SymbolString;
}

impl<F> Rewrite for F
where
    F: Fn(&SymbolString) -> SymbolString,
{
    fn apply(&self, symbols: &SymbolString) -> SymbolString {
        self(symbols)
    }
}

/// An immutable mapping from a symbol to its replacement.
///
/// Symbols without an entry are replaced by themselves. Empty replacements are
/// rejected at construction.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "BTreeMap<String, String>", into = "BTreeMap<String, String>")]
pub struct RuleSet {
    rules: BTreeMap<Symbol, SymbolString>,
}

impl RuleSet {
    /// A rule set with no rules: every generation is the identity.
    pub fn identity() -> Self {
        Self::default()
    }

    /// Builds a rule set from `(symbol, replacement)` pairs.
    ///
    /// Fails with [`Error::InvalidConfiguration`] on an empty replacement or a
    /// symbol listed twice.
    pub fn from_rules<I, S>(rules: I) -> Result<Self>
    where
        I: IntoIterator<Item = (Symbol, S)>,
        S: Into<SymbolString>,
    {
        rules
            .into_iter()
            .try_fold(Self::default(), |set, (symbol, replacement)| {
                set.with_rule(symbol, replacement)
            })
    }

    /// Returns a copy of this rule set extended with `symbol -> replacement`.
    pub fn with_rule(
        mut self,
        symbol: Symbol,
        replacement: impl Into<SymbolString>,
    ) -> Result<Self> {
        let replacement = replacement.into();
        if replacement.is_empty() {
            return Err(Error::invalid(format!(
                "rule for '{symbol}' has an empty replacement"
            )));
        }
        if self.rules.contains_key(&symbol) {
            return Err(Error::invalid(format!("duplicate rule for '{symbol}'")));
        }
        self.rules.insert(symbol, replacement);
        Ok(self)
    }

    /// For grammars compiled into the crate, which are known to be well formed.
    pub(crate) fn builtin(rules: &[(Symbol, &str)]) -> Self {
        Self {
            rules: rules
                .iter()
                .map(|&(symbol, replacement)| (symbol, SymbolString::from(replacement)))
                .collect(),
        }
    }

    /// The replacement for `symbol`, if it has one.
    pub fn rule(&self, symbol: Symbol) -> Option<&SymbolString> {
        self.rules.get(&symbol)
    }

    /// Number of rules.
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    /// True for the identity rule set.
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Iterates over `(symbol, replacement)` pairs in symbol order.
    pub fn iter(&self) -> impl Iterator<Item = (Symbol, &SymbolString)> {
        self.rules.iter().map(|(k, v)| (*k, v))
    }

    /// Predicts `expand(axiom, self, generations).len()` without building any
    /// strings.
    ///
    /// Returns `None` if the length does not fit below `usize::MAX`. Rules the
    /// axiom can never reach have no influence on the result.
    pub fn expanded_len(&self, axiom: &SymbolString, generations: u32) -> Option<usize> {
        // Symbols the axiom can reach through any number of rewrites.
        let mut reachable: HashSet<Symbol> = axiom.symbols().collect();
        let mut pending: Vec<Symbol> = reachable.iter().copied().collect();
        while let Some(symbol) = pending.pop() {
            if let Some(replacement) = self.rules.get(&symbol) {
                for c in replacement.symbols() {
                    if reachable.insert(c) {
                        pending.push(c);
                    }
                }
            }
        }

        // lengths[c] = length of c after the generations processed so far,
        // saturated at usize::MAX. A saturated entry only matters if it feeds
        // the final sum, which then saturates too.
        let mut lengths: HashMap<Symbol, usize> =
            reachable.into_iter().map(|c| (c, 1)).collect();

        for _ in 0..generations {
            let mut next = HashMap::with_capacity(lengths.len());
            for &symbol in lengths.keys() {
                let len = match self.rules.get(&symbol) {
                    Some(replacement) => replacement
                        .symbols()
                        .fold(0usize, |acc, c| acc.saturating_add(lengths[&c])),
                    None => lengths[&symbol],
                };
                next.insert(symbol, len);
            }
            lengths = next;
        }

        let total = axiom
            .symbols()
            .fold(0usize, |acc, c| acc.saturating_add(lengths[&c]));
        (total != usize::MAX).then_some(total)
    }
}

impl Rewrite for RuleSet {
    fn apply(&self, symbols: &SymbolString) -> SymbolString {
        let mut next = SymbolString::with_capacity(symbols.byte_len() * 2);
        for symbol in symbols.symbols() {
            match self.rules.get(&symbol) {
                Some(replacement) => next.push_str(replacement),
                None => next.push(symbol),
            }
        }
        next
    }
}

impl TryFrom<BTreeMap<String, String>> for RuleSet {
    type Error = Error;

    fn try_from(map: BTreeMap<String, String>) -> Result<Self> {
        let mut rules = Vec::with_capacity(map.len());
        for (key, replacement) in map {
            let mut chars = key.chars();
            let symbol = match (chars.next(), chars.next()) {
                (Some(c), None) => c,
                _ => {
                    return Err(Error::invalid(format!(
                        "rule key '{key}' must be exactly one symbol"
                    )));
                }
            };
            rules.push((symbol, SymbolString::from(replacement)));
        }
        Self::from_rules(rules)
    }
}

impl From<RuleSet> for BTreeMap<String, String> {
    fn from(set: RuleSet) -> Self {
        set.rules
            .into_iter()
            .map(|(k, v)| (k.to_string(), v.0))
            .collect()
    }
}

/// Applies `rewriter` to `axiom` exactly `generations` times.
///
/// `generations == 0` returns the axiom unchanged.
pub fn expand<R: Rewrite + ?Sized>(
    axiom: &SymbolString,
    rewriter: &R,
    generations: u32,
) -> SymbolString {
    let mut state = axiom.clone();
    for generation in 1..=generations {
        state = rewriter.apply(&state);
        tracing::debug!(generation, symbols = state.len(), "rewrite pass");
    }
    state
}
