use std::collections::{BTreeMap, BTreeSet};

use crate::generator::{
  ast::{Documentation, EnumConversionDef, EnumDef, EnumVariant, TypeToken},
  naming::identifiers::{ensure_unique, to_rust_type_name},
};

/// Generated enums bucketed by their sorted literal set. Enums that share a
/// bucket are siblings and convert into each other.
#[derive(Debug, Default)]
pub(crate) struct EnumRegistry {
  buckets: BTreeMap<Vec<String>, Vec<EnumDef>>,
}

impl EnumRegistry {
  /// Builds the declaration for `members` and files it under its literal set.
  pub(crate) fn register(
    &mut self,
    name: TypeToken,
    docs: Documentation,
    members: &[String],
    default: Option<&str>,
  ) -> EnumDef {
    let def = build_enum(name, docs, members, default);

    let mut key = members.to_vec();
    key.sort();
    self.buckets.entry(key).or_default().push(def.clone());

    def
  }

  /// One conversion per ordered pair of distinct siblings: N siblings yield N×(N−1).
  pub(crate) fn conversions(&self) -> Vec<EnumConversionDef> {
    let mut conversions = vec![];
    for siblings in self.buckets.values().filter(|siblings| siblings.len() > 1) {
      for source in siblings {
        for target in siblings.iter().filter(|target| target.name != source.name) {
          let variants = source
            .variants
            .iter()
            .filter_map(|variant| {
              target
                .variant_for(&variant.value)
                .map(|mapped| (variant.name.clone(), mapped.clone()))
            })
            .collect();
          conversions.push(EnumConversionDef {
            source: source.name.clone(),
            target: target.name.clone(),
            variants,
          });
        }
      }
    }
    conversions
  }
}

fn build_enum(name: TypeToken, docs: Documentation, members: &[String], default: Option<&str>) -> EnumDef {
  let mut used = BTreeSet::new();
  let variants = members
    .iter()
    .map(|member| {
      let variant = ensure_unique(&to_rust_type_name(member), &used);
      used.insert(variant.clone());
      EnumVariant {
        name: TypeToken::new(&variant),
        value: member.clone(),
      }
    })
    .collect::<Vec<_>>();

  let default = default.and_then(|value| {
    variants
      .iter()
      .find(|variant| variant.value == value)
      .map(|variant| variant.name.clone())
  });

  EnumDef {
    name,
    docs,
    variants,
    default,
  }
}
