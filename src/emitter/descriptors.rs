//! Property and prototype restoration: decides, for one `ObjectValue`,
//! which properties can ride along on an object literal versus needing an
//! explicit `Object.defineProperty`/`defineProperties` call, and in what
//! order. Integer keys are emitted before string keys, matching the
//! engine's own enumeration order for integer-indexed properties up to
//! 2^32 - 2 (spec §8 boundary behavior), and accessor or non-default
//! descriptors always fall back to the two-step `defineProperties` cascade
//! rather than literal syntax.

use crate::value::{Descriptor, ObjectValue, Property, PropertyKey, ValueId};

use super::output_ast::{DescriptorExpr, OutputExpr, PropertyKeyExpr};

/// One property, classified for emission purposes. `key` is owned rather
/// than borrowed: integer-indexed properties don't have a `PropertyKey` of
/// their own in the object's data (they're keyed by a bare `u32` in
/// `indexed_properties`), so one has to be synthesized here regardless.
pub enum PlacedProperty<'a> {
    /// Can be written as `key: value` inside the initial object literal.
    Literal { key: PropertyKey, value: ValueId },
    /// Needs an explicit descriptor restoration call.
    Explicit { key: PropertyKey, descriptor: &'a Descriptor },
}

/// Orders an object's properties for emission: integer keys ascending,
/// then string/symbol keys in declaration order, partitioned into the
/// literal-eligible set and the explicit-descriptor set.
pub fn place_properties(object: &ObjectValue) -> Vec<PlacedProperty<'_>> {
    let mut placed = Vec::with_capacity(object.indexed_properties.len() + object.named_properties.len());

    for (index, property) in &object.indexed_properties {
        placed.push(classify(PropertyKey::String(index.to_string()), property));
    }

    for (key, property) in &object.named_properties {
        placed.push(classify(key.clone(), property));
    }

    placed
}

fn classify(key: PropertyKey, property: &Property) -> PlacedProperty<'_> {
    match &property.descriptor {
        Descriptor::Data { value, .. } if property.descriptor.is_default_data() => {
            PlacedProperty::Literal { key, value: *value }
        }
        other => PlacedProperty::Explicit { key, descriptor: other },
    }
}

/// Builds the `Object.defineProperties` entries for every property this
/// object placed as `Explicit`, given a function that resolves a `ValueId`
/// to its already-planned output expression (a previously emitted factory
/// call, identifier, or literal).
pub fn build_define_properties_entries(
    placed: &[PlacedProperty<'_>],
    resolve: &impl Fn(ValueId) -> OutputExpr,
) -> Vec<(PropertyKeyExpr, DescriptorExpr)> {
    placed
        .iter()
        .filter_map(|p| match p {
            PlacedProperty::Explicit { key, descriptor } => {
                Some((property_key_expr(key, resolve), descriptor_expr(descriptor, resolve)))
            }
            PlacedProperty::Literal { .. } => None,
        })
        .collect()
}

fn property_key_expr(key: &PropertyKey, resolve: &impl Fn(ValueId) -> OutputExpr) -> PropertyKeyExpr {
    match key {
        PropertyKey::String(s) => {
            if let Ok(n) = s.parse::<u32>() {
                PropertyKeyExpr::NumberLiteral(n)
            } else {
                PropertyKeyExpr::StringLiteral(s.clone())
            }
        }
        PropertyKey::Symbol(id) => PropertyKeyExpr::SymbolRef(Box::new(resolve(*id))),
    }
}

fn descriptor_expr(descriptor: &Descriptor, resolve: &impl Fn(ValueId) -> OutputExpr) -> DescriptorExpr {
    match descriptor {
        Descriptor::Data { value, writable, enumerable, configurable } => DescriptorExpr::Data {
            value: Box::new(resolve(*value)),
            writable: *writable,
            enumerable: *enumerable,
            configurable: *configurable,
        },
        Descriptor::Accessor { getter, setter, enumerable, configurable } => DescriptorExpr::Accessor {
            getter: getter.map(|id| Box::new(resolve(id))),
            setter: setter.map(|id| Box::new(resolve(id))),
            enumerable: *enumerable,
            configurable: *configurable,
        },
    }
}
