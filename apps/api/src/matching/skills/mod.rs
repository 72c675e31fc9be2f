//! Skill Extractor: recognizes taxonomy skills in free text.
//!
//! Matching is exact: every alias is lexed with the same rules as the
//! document (`normalizer::lexemes`) and compared as a token window sliding
//! over the document's lexemes. No fuzzy or partial matches; an abbreviation
//! is only recognized when the taxonomy lists it as an alias.

mod builtin;

use std::collections::{BTreeSet, HashMap};
use std::path::Path;

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};

use crate::matching::normalizer::lexemes;

/// One taxonomy entry as authored (built-in table or JSON file).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SkillDefinition {
    pub name: String,
    #[serde(default)]
    pub aliases: Vec<String>,
    /// Lower sorts first in feedback. Unset sorts after every prioritized skill.
    #[serde(default)]
    pub priority: Option<u32>,
}

impl SkillDefinition {
    /// Canonical identifier: the case-folded name.
    pub fn id(&self) -> String {
        canonical_id(&self.name)
    }

    fn sort_key(&self) -> (u32, String) {
        (self.priority.unwrap_or(u32::MAX), self.name.to_lowercase())
    }
}

fn canonical_id(name: &str) -> String {
    name.trim().to_lowercase()
}

/// A compiled alias: the skill it belongs to and its lexed token window.
#[derive(Debug, Clone)]
struct AliasPattern {
    skill: usize,
    tokens: Vec<String>,
}

/// Canonical skill → surface-form aliases, compiled for phrase matching.
#[derive(Debug, Clone)]
pub struct SkillTaxonomy {
    skills: Vec<SkillDefinition>,
    by_id: HashMap<String, usize>,
    /// Aliases keyed by their first token.
    patterns: HashMap<String, Vec<AliasPattern>>,
}

impl SkillTaxonomy {
    /// Compiles and validates a taxonomy.
    ///
    /// Rejects empty or duplicate skill names, aliases that lex to nothing,
    /// and aliases claimed by two different skills.
    pub fn from_definitions(definitions: Vec<SkillDefinition>) -> Result<Self> {
        let mut by_id = HashMap::with_capacity(definitions.len());
        let mut patterns: HashMap<String, Vec<AliasPattern>> = HashMap::new();
        let mut owners: HashMap<Vec<String>, usize> = HashMap::new();

        for (idx, def) in definitions.iter().enumerate() {
            let id = def.id();
            if id.is_empty() {
                bail!("Skill at position {idx} has an empty name");
            }
            if by_id.insert(id.clone(), idx).is_some() {
                bail!("Duplicate skill '{}'", def.name);
            }

            for surface in std::iter::once(&def.name).chain(def.aliases.iter()) {
                let tokens = lexemes(surface);
                if tokens.is_empty() {
                    bail!("Alias '{surface}' of skill '{}' has no matchable tokens", def.name);
                }
                match owners.get(&tokens) {
                    Some(&owner) if owner == idx => continue,
                    Some(&owner) => bail!(
                        "Alias '{surface}' is claimed by both '{}' and '{}'",
                        definitions[owner].name,
                        def.name
                    ),
                    None => {}
                }
                owners.insert(tokens.clone(), idx);
                patterns
                    .entry(tokens[0].clone())
                    .or_default()
                    .push(AliasPattern { skill: idx, tokens });
            }
        }

        // Longest windows first so lookups stay deterministic.
        for list in patterns.values_mut() {
            list.sort_by(|a, b| b.tokens.len().cmp(&a.tokens.len()).then(a.skill.cmp(&b.skill)));
        }

        Ok(Self {
            skills: definitions,
            by_id,
            patterns,
        })
    }

    /// The taxonomy shipped with the service.
    pub fn builtin() -> Result<Self> {
        let definitions = builtin::BUILTIN_SKILLS
            .iter()
            .map(|(name, aliases, priority)| SkillDefinition {
                name: name.to_string(),
                aliases: aliases.iter().map(|a| a.to_string()).collect(),
                priority: Some(*priority),
            })
            .collect();
        Self::from_definitions(definitions)
    }

    /// Loads a taxonomy from a JSON array of `{ name, aliases, priority }`.
    pub fn load(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read skill taxonomy {}", path.display()))?;
        let definitions: Vec<SkillDefinition> = serde_json::from_str(&raw)
            .with_context(|| format!("Invalid skill taxonomy {}", path.display()))?;
        Self::from_definitions(definitions)
            .with_context(|| format!("Invalid skill taxonomy {}", path.display()))
    }

    pub fn get(&self, id: &str) -> Option<&SkillDefinition> {
        self.by_id.get(id).map(|&idx| &self.skills[idx])
    }

    pub fn len(&self) -> usize {
        self.skills.len()
    }

    pub fn is_empty(&self) -> bool {
        self.skills.is_empty()
    }

    /// Extracts the set of skills whose aliases occur in `text`.
    pub fn extract(&self, text: &str) -> SkillSet {
        let tokens = lexemes(text);
        let mut found = BTreeSet::new();

        for start in 0..tokens.len() {
            let Some(candidates) = self.patterns.get(&tokens[start]) else {
                continue;
            };
            for pattern in candidates {
                let end = start + pattern.tokens.len();
                if end <= tokens.len() && tokens[start..end] == pattern.tokens[..] {
                    found.insert(self.skills[pattern.skill].id());
                }
            }
        }

        SkillSet(found)
    }

    /// Display names for `skills`, ordered by taxonomy priority, then
    /// alphabetically. Ids unknown to this taxonomy sort last, by id.
    pub fn ordered_names(&self, skills: &SkillSet) -> Vec<String> {
        let mut known: Vec<&SkillDefinition> = Vec::new();
        let mut unknown: Vec<&str> = Vec::new();
        for id in skills.iter() {
            match self.get(id) {
                Some(def) => known.push(def),
                None => unknown.push(id),
            }
        }
        known.sort_by_key(|def| def.sort_key());

        known
            .into_iter()
            .map(|def| def.name.clone())
            .chain(unknown.into_iter().map(String::from))
            .collect()
    }
}

/// Deduplicated, case-normalized canonical skill ids found in one document.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SkillSet(BTreeSet<String>);

impl SkillSet {
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn contains(&self, id: &str) -> bool {
        self.0.contains(&canonical_id(id))
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }

    pub fn intersection(&self, other: &SkillSet) -> SkillSet {
        SkillSet(self.0.intersection(&other.0).cloned().collect())
    }

    /// Skills in `self` that `other` lacks.
    pub fn difference(&self, other: &SkillSet) -> SkillSet {
        SkillSet(self.0.difference(&other.0).cloned().collect())
    }
}

impl<S: AsRef<str>> FromIterator<S> for SkillSet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        SkillSet(iter.into_iter().map(|s| canonical_id(s.as_ref())).collect())
    }
}
