use tracing::debug;

use crate::error::{Error, Result};
use crate::terms::Term;
use crate::variable::{LinguisticVariable, Variables};

/// `damage AND accessibility AND population => priority`.
///
/// Each field is an index into the matching variable's term list.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Rule {
    pub(crate) damage: usize,
    pub(crate) accessibility: usize,
    pub(crate) population: usize,
    pub(crate) consequence: usize,
}

impl Rule {
    /// Antecedent term indices in damage, accessibility, population order.
    pub fn premise(&self) -> [usize; 3] {
        [self.damage, self.accessibility, self.population]
    }

    /// Index of the priority term this rule concludes.
    pub fn consequence(&self) -> usize {
        self.consequence
    }

    /// Term names of this rule, `None` if an index is out of range for `vars`.
    pub fn labels<'v>(&self, vars: &'v Variables) -> Option<RuleLabels<'v>> {
        let name = |var: &'v LinguisticVariable, i: usize| var.terms().get(i).map(Term::name);

        Some(RuleLabels {
            damage: name(&vars.damage, self.damage)?,
            accessibility: name(&vars.accessibility, self.accessibility)?,
            population: name(&vars.population, self.population)?,
            consequence: name(&vars.priority, self.consequence)?,
        })
    }
}

/// Term names of a rule, for display.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RuleLabels<'v> {
    pub damage: &'v str,
    pub accessibility: &'v str,
    pub population: &'v str,
    pub consequence: &'v str,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RuleSet(pub(crate) Vec<Rule>);

impl RuleSet {
    pub fn with_capacity(capacity: usize) -> Self {
        RuleSet(Vec::with_capacity(capacity))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Rule> {
        self.0.iter()
    }

    pub fn get(&self, index: usize) -> Option<&Rule> {
        self.0.get(index)
    }

    /// Checks every rule only points at terms that exist in `vars`.
    pub(crate) fn check_against(&self, vars: &Variables) -> Result<()> {
        let sizes = [
            vars.damage.terms().len(),
            vars.accessibility.terms().len(),
            vars.population.terms().len(),
        ];

        for (i, rule) in self.0.iter().enumerate() {
            let in_range = rule.premise().iter().zip(sizes).all(|(t, n)| *t < n)
                && rule.consequence < vars.priority.terms().len();

            if !in_range {
                return Err(Error::config(format!("rule R{} references a term that does not exist", i + 1)));
            }
        }

        Ok(())
    }
}

impl<'r> IntoIterator for &'r RuleSet {
    type Item = &'r Rule;
    type IntoIter = std::slice::Iter<'r, Rule>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

/// Builds one rule per combination of input terms.
///
/// Damage is the outer loop, then accessibility, then population, so rule
/// `R1` is always `(first, first, first)`. `heuristic` maps the three term
/// names to the name of a priority term.
pub fn build_rules<H, S>(vars: &Variables, mut heuristic: H) -> Result<RuleSet>
where
    H: FnMut(&str, &str, &str) -> Result<S>,
    S: AsRef<str>,
{
    let [damage, accessibility, population] = vars.inputs();
    let mut rules = RuleSet::with_capacity(damage.terms().len() * accessibility.terms().len() * population.terms().len());

    for (d, d_term) in damage.terms().iter().enumerate() {
        for (a, a_term) in accessibility.terms().iter().enumerate() {
            for (p, p_term) in population.terms().iter().enumerate() {
                let output = heuristic(d_term.name(), a_term.name(), p_term.name())?;
                let output = output.as_ref();
                let consequence = vars.priority.term_index(output).ok_or_else(|| {
                    Error::config(format!("priority has no term `{output}`"))
                })?;

                rules.0.push(Rule {
                    damage: d,
                    accessibility: a,
                    population: p,
                    consequence,
                });
            }
        }
    }

    debug!(rules = rules.len(), "built rule base");

    Ok(rules)
}

/// Scores each input level 1-3 (worst case highest) and maps the 3-9 total
/// onto the five priority terms.
pub fn severity_heuristic(damage: &str, accessibility: &str, population: &str) -> Result<&'static str> {
    fn level(variable: &str, label: &str, levels: [&str; 3]) -> Result<u8> {
        levels
            .iter()
            .position(|l| *l == label)
            .map(|i| i as u8 + 1)
            .ok_or_else(|| Error::config(format!("unrecognised {variable} term `{label}`")))
    }

    let score = level("damage", damage, ["low", "medium", "high"])?
        + level("population", population, ["low", "medium", "high"])?
        + level("accessibility", accessibility, ["poor", "moderate", "good"])?;

    Ok(match score {
        8.. => "very_high",
        7 => "high",
        6 => "medium_high",
        5 => "medium",
        _ => "low",
    })
}
