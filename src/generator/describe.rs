//! Name and description rendering.
//!
//! Names follow a fixed precedence: a property literally called "name",
//! then a name template found by walking up the kind lattice, then the
//! container possessive for parts, then the raw name tokens. Descriptions
//! render the chosen kind's template through a small interpreter with a
//! closed set of meta-directives; anything else falls through to a
//! property or part of the kind.

use rustc_hash::FxHashSet;

use crate::ontology::{IndividualId, NounId, TemplatePiece};

use super::invention::Invention;

/// Meta-directives recognized inside templates.
const META_DIRECTIVES: &[&str] = &[
    "Container",
    "ContainerAndPart",
    "NameString",
    "ProperNameIfDefined",
    "Modifiers",
    "Noun",
    "AllProperties",
];

pub(super) fn format_number(value: f64) -> String {
    if (value - value.round()).abs() < 0.05 {
        format!("{}", value.round() as i64)
    } else {
        format!("{value:.1}")
    }
}

impl Invention<'_> {
    /// The display name of an individual. Cached per invention.
    pub fn name_string(&self, id: IndividualId) -> String {
        if let Some(cached) = self.name_cache.borrow().get(&id) {
            return cached.clone();
        }
        let name = self.compute_name(id, 0);
        self.name_cache.borrow_mut().insert(id, name.clone());
        name
    }

    fn compute_name(&self, id: IndividualId, depth: usize) -> String {
        // A property literally called "name" wins.
        if let Some(value) = self.property_value(id, "name") {
            return value;
        }
        // Then a name template, found by walking up the kind lattice.
        if depth == 0 {
            if let Some((_, template)) = self.find_template(id, |n| n.name_template.as_deref()) {
                return self.render_template(id, template, depth + 1);
            }
        }
        // Then the container possessive for part-individuals.
        let individual = self.individual(id);
        if let (Some(container), Some(part_ref)) = (individual.container, individual.container_part)
        {
            let part_name = &self.ontology.noun(part_ref.owner).parts[part_ref.index].name;
            return format!("{}'s {}", self.name_string(container), part_name);
        }
        individual.name.to_string()
    }

    /// Render the individual's description from its kind's template, or
    /// the default "<name> is a <modifiers> <noun> <properties>" shape.
    pub fn description(&self, id: IndividualId) -> String {
        if let Some((_, template)) = self.find_template(id, |n| n.description_template.as_deref())
        {
            return self.render_template(id, template, 0);
        }
        let mut out = format!("{} is a ", self.name_string(id));
        let adjectives = self.modifiers_text(id);
        if !adjectives.is_empty() {
            out.push_str(&adjectives);
            out.push(' ');
        }
        out.push_str(&self.noun_text(id));
        let properties = self.all_properties_text(id, &self.name_consumed_properties(id));
        if !properties.is_empty() {
            out.push_str(" with ");
            out.push_str(&properties);
        }
        out
    }

    /// Walk the most-specific kinds, then their ancestors, for the first
    /// kind carrying the requested template.
    fn find_template(
        &self,
        id: IndividualId,
        get: fn(&crate::ontology::CommonNoun) -> Option<&[TemplatePiece]>,
    ) -> Option<(NounId, &[TemplatePiece])> {
        let mut frontier = self.most_specific_nouns(id);
        let mut seen: FxHashSet<NounId> = frontier.iter().copied().collect();
        let mut index = 0;
        while index < frontier.len() {
            let kind = frontier[index];
            index += 1;
            if let Some(template) = get(self.ontology.noun(kind)) {
                return Some((kind, template));
            }
            for &parent in &self.ontology.noun(kind).superkinds {
                if seen.insert(parent) {
                    frontier.push(parent);
                }
            }
        }
        None
    }

    fn render_template(&self, id: IndividualId, template: &[TemplatePiece], depth: usize) -> String {
        let mut out = String::new();
        for piece in template {
            match piece {
                TemplatePiece::Text(text) => out.push_str(text),
                TemplatePiece::Directive(directive) => {
                    out.push_str(&self.render_directive(id, directive, depth));
                }
            }
        }
        out
    }

    fn render_directive(&self, id: IndividualId, directive: &str, depth: usize) -> String {
        let individual = self.individual(id);
        match directive {
            "Container" => individual
                .container
                .map(|c| self.name_string(c))
                .unwrap_or_default(),
            "ContainerAndPart" => match (individual.container, individual.container_part) {
                (Some(container), Some(part_ref)) => {
                    let part = &self.ontology.noun(part_ref.owner).parts[part_ref.index].name;
                    format!("{}'s {}", self.name_string(container), part)
                }
                _ => self.name_string(id),
            },
            // Recursion-guarded: a name template that mentions
            // [NameString] falls back past the template.
            "NameString" => {
                if depth >= 1 {
                    individual.name.to_string()
                } else {
                    self.name_string(id)
                }
            }
            "ProperNameIfDefined" => {
                if individual.ephemeral {
                    String::new()
                } else {
                    individual.name.to_string()
                }
            }
            "Modifiers" => self.modifiers_text(id),
            "Noun" => self.noun_text(id),
            "AllProperties" => {
                let mut consumed = self.name_consumed_properties(id);
                consumed.insert(directive.to_lowercase());
                self.all_properties_text(id, &consumed)
            }
            other if !META_DIRECTIVES.contains(&other) => {
                let name = other.to_lowercase();
                // A property of the chosen kind...
                if let Some(value) = self.property_value(id, &name) {
                    return value;
                }
                // ...or a part: render the part individuals' names.
                for (part_ref, children) in &individual.parts {
                    let part = &self.ontology.noun(part_ref.owner).parts[part_ref.index];
                    if part.name.to_string() == name {
                        return children
                            .iter()
                            .map(|&c| self.name_string(c))
                            .collect::<Vec<_>>()
                            .join(", ");
                    }
                }
                String::new()
            }
            _ => String::new(),
        }
    }

    fn modifiers_text(&self, id: IndividualId) -> String {
        self.adjectives_describing(id)
            .iter()
            .map(|&a| self.ontology.adjective(a).name.to_string())
            .collect::<Vec<_>>()
            .join(", ")
    }

    fn noun_text(&self, id: IndividualId) -> String {
        self.most_specific_nouns(id)
            .first()
            .map(|&k| self.ontology.noun(k).singular.to_string())
            .unwrap_or_default()
    }

    /// Property names consumed by name generation, suppressed from
    /// `[AllProperties]`.
    fn name_consumed_properties(&self, id: IndividualId) -> FxHashSet<String> {
        let mut consumed = FxHashSet::default();
        consumed.insert("name".to_string());
        if let Some((_, template)) = self.find_template(id, |n| n.name_template.as_deref()) {
            for piece in template {
                if let TemplatePiece::Directive(d) = piece {
                    if !META_DIRECTIVES.contains(&d.as_str()) {
                        consumed.insert(d.to_lowercase());
                    }
                }
            }
        }
        consumed
    }

    fn all_properties_text(&self, id: IndividualId, consumed: &FxHashSet<String>) -> String {
        let mut parts: Vec<String> = Vec::new();
        let mut keys: Vec<(IndividualId, NounId, usize)> =
            self.property_vars.keys().copied().collect();
        keys.sort_by_key(|&(i, k, index)| (i.0, k.0, index));
        for (owner_id, kind, index) in keys {
            if owner_id != id {
                continue;
            }
            let property = &self.ontology.noun(kind).properties[index];
            let name = property.name.to_string();
            if consumed.contains(&name) {
                continue;
            }
            let var = self.property_vars[&(owner_id, kind, index)];
            if let Some(value) = self.domain_value(var) {
                parts.push(format!("{name} {value}"));
            }
        }
        parts.join(" and ")
    }
}
