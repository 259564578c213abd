//! Monadic concepts and the structures that hang off a common noun:
//! alternative sets, implied modifiers, parts, and properties.

use crate::base::TokenString;

use super::ids::{AdjectiveId, IndividualId, Literal, NounId};

/// A kind: a node in the multi-parent classification lattice.
#[derive(Debug, Clone)]
pub struct CommonNoun {
    pub singular: TokenString,
    pub plural: TokenString,
    /// Parent kinds in the lattice.
    pub superkinds: Vec<NounId>,
    /// Child kinds, parallel with `subkind_frequencies`. Frequencies
    /// annotate the edge, not the child node.
    pub subkinds: Vec<NounId>,
    pub subkind_frequencies: Vec<f32>,
    /// Adjectives worth mentioning when describing an individual of this kind.
    pub relevant_adjectives: Vec<AdjectiveId>,
    /// Bounded-cardinality adjective alternatives ("cats are big or small").
    pub alternative_sets: Vec<AlternativeSet>,
    /// Conditional modifiers ("big cats are scary").
    pub implied_adjectives: Vec<ConditionalModifier>,
    /// Containment slots, instantiated for every individual of this kind.
    pub parts: Vec<Part>,
    pub properties: Vec<Property>,
    /// Template for naming individuals; found by walking up the lattice.
    pub name_template: Option<Vec<TemplatePiece>>,
    /// Template for describing individuals.
    pub description_template: Option<Vec<TemplatePiece>>,
    /// Suppress this kind's individuals from printed output.
    pub suppress_description: bool,
    /// Density hint for the solver, when the author said anything.
    pub initial_probability: Option<f32>,
}

impl CommonNoun {
    pub fn new(singular: TokenString, plural: TokenString) -> Self {
        CommonNoun {
            singular,
            plural,
            superkinds: Vec::new(),
            subkinds: Vec::new(),
            subkind_frequencies: Vec::new(),
            relevant_adjectives: Vec::new(),
            alternative_sets: Vec::new(),
            implied_adjectives: Vec::new(),
            parts: Vec::new(),
            properties: Vec::new(),
            name_template: None,
            description_template: None,
            suppress_description: false,
            initial_probability: None,
        }
    }
}

/// An attribute. Adjectives are binary literals: present or negated.
#[derive(Debug, Clone)]
pub struct Adjective {
    pub name: TokenString,
    /// Silent adjectives are constrained but never mentioned in prose.
    pub is_silent: bool,
    /// How many alternative sets mention this adjective.
    pub reference_count: usize,
}

impl Adjective {
    pub fn new(name: TokenString) -> Self {
        Adjective {
            name,
            is_silent: false,
            reference_count: 0,
        }
    }
}

/// A name permanently bound to one individual of one or more kinds.
#[derive(Debug, Clone)]
pub struct ProperNoun {
    pub name: TokenString,
    pub kinds: Vec<NounId>,
    /// The permanent individual in the ontology arena.
    pub individual: IndividualId,
}

/// "Between `min_count` and `max_count` of these signed alternatives hold."
#[derive(Debug, Clone)]
pub struct AlternativeSet {
    pub alternatives: Vec<Literal>,
    /// Relative frequencies, parallel with `alternatives`.
    pub frequencies: Vec<f32>,
    pub min_count: usize,
    pub max_count: usize,
    /// When every alternative is a single-reference positive adjective,
    /// the generator may pre-bias one member true per individual.
    pub allow_pre_initialization: bool,
}

/// "If all `conditions` hold of an individual of this kind, `modifier` holds."
#[derive(Debug, Clone)]
pub struct ConditionalModifier {
    pub conditions: Vec<Literal>,
    pub modifier: Literal,
}

/// A containment slot: each individual of the owning kind gets `count`
/// fresh individuals of `kind`, tagged with `modifiers`.
#[derive(Debug, Clone)]
pub struct Part {
    pub name: TokenString,
    pub count: usize,
    pub kind: NounId,
    pub modifiers: Vec<Literal>,
}

/// A typed per-individual attribute: a menu of strings or a real interval.
/// A property literally named "name" is special-cased by descriptions.
#[derive(Debug, Clone)]
pub struct Property {
    pub name: TokenString,
    pub ty: PropertyType,
    /// Modifier-conditioned menu restrictions.
    pub menu_rules: Vec<MenuRule>,
    /// Modifier-conditioned interval tightenings.
    pub interval_rules: Vec<IntervalRule>,
}

#[derive(Debug, Clone)]
pub enum PropertyType {
    /// Finite menu of string values.
    Menu(Vec<String>),
    /// Continuous closed interval.
    Interval(f64, f64),
}

#[derive(Debug, Clone)]
pub struct MenuRule {
    pub conditions: Vec<Literal>,
    pub menu: Vec<String>,
}

#[derive(Debug, Clone)]
pub struct IntervalRule {
    pub conditions: Vec<Literal>,
    pub low: f64,
    pub high: f64,
}

/// One piece of a name or description template. Directives are either the
/// closed meta-directive set (`[Noun]`, `[Container]`, ...) or the name of
/// a property or part of the chosen kind.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TemplatePiece {
    Text(String),
    Directive(String),
}

/// Parse `"[Size] [Noun] - [Modifiers]"` into pieces.
pub fn parse_template(text: &str) -> Vec<TemplatePiece> {
    let mut pieces = Vec::new();
    let mut rest = text;
    while let Some(open) = rest.find('[') {
        if !rest[..open].is_empty() {
            pieces.push(TemplatePiece::Text(rest[..open].to_string()));
        }
        match rest[open..].find(']') {
            Some(close) => {
                pieces.push(TemplatePiece::Directive(
                    rest[open + 1..open + close].to_string(),
                ));
                rest = &rest[open + close + 1..];
            }
            None => {
                pieces.push(TemplatePiece::Text(rest[open..].to_string()));
                rest = "";
            }
        }
    }
    if !rest.is_empty() {
        pieces.push(TemplatePiece::Text(rest.to_string()));
    }
    pieces
}
