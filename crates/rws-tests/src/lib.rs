//! Synthetic save documents for the integration tests and benches.
//!
//! Real saves run to tens of megabytes, so the tests build small ones with
//! the same shape: a `<meta>` block, one map whose `<things>` list mixes
//! grass with other plants and buildings, and a block of decimal stats.
//!
//! ```text
//! <savegame>
//!   <meta> … </meta>
//!   <game>
//!     <maps><li><things> grass, trees, walls … </things></li></maps>
//!     <stats> decimal leaves … </stats>
//!   </game>
//! </savegame>
//! ```
//!
//! Every value is derived from the thing's id, so two builds with the same
//! calls produce identical text.

/// One `<thing>` in the map.
#[derive(Clone, Debug)]
enum Thing {
    Grass { def: String, age: Option<u32> },
    Other { class: String, def: String },
}

/// Builder for a synthetic save.
///
/// # Usage
///
/// ```rust
/// use rws_tests::SaveBuilder;
///
/// let save = SaveBuilder::new()
///     .grasses(3, 1)
///     .thing("Building", "Wall")
///     .decimal("temperature", "-3.25")
///     .build();
/// assert!(save.contains("<def>PlantTallGrass</def>"));
/// ```
#[derive(Clone, Debug, Default)]
pub struct SaveBuilder {
    things: Vec<Thing>,
    decimals: Vec<(String, String)>,
}

impl SaveBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add one grass thing. `age: None` leaves out the `<age>` element.
    #[must_use]
    pub fn grass(mut self, def: &str, age: Option<u32>) -> Self {
        self.things.push(Thing::Grass {
            def: def.to_string(),
            age,
        });
        self
    }

    /// Add `aged` grass things with an `<age>`, then `ageless` without,
    /// alternating between the two grass defs.
    #[must_use]
    pub fn grasses(mut self, aged: usize, ageless: usize) -> Self {
        for i in 0..aged + ageless {
            let def = if i % 2 == 0 { "PlantGrass" } else { "PlantTallGrass" };
            let age = (i < aged).then(|| 120_000 + 7919 * u32::try_from(i).unwrap_or(0) % 800_000);
            self = self.grass(def, age);
        }
        self
    }

    /// Add a thing that is not a grass carrier.
    #[must_use]
    pub fn thing(mut self, class: &str, def: &str) -> Self {
        self.things.push(Thing::Other {
            class: class.to_string(),
            def: def.to_string(),
        });
        self
    }

    /// Add a `<stats>` leaf holding `value` verbatim.
    #[must_use]
    pub fn decimal(mut self, name: &str, value: &str) -> Self {
        self.decimals.push((name.to_string(), value.to_string()));
        self
    }

    /// Add `count` decimal leaves with varied magnitudes and signs.
    #[must_use]
    pub fn decimals(mut self, count: usize) -> Self {
        for i in 0..count {
            let whole = (i * 37) % 500;
            let frac = (i * 7193) % 100_000;
            let sign = if i % 5 == 3 { "-" } else { "" };
            self = self.decimal(&format!("stat{i}"), &format!("{sign}{whole}.{frac:05}"));
        }
        self
    }

    pub fn grass_count(&self) -> usize {
        self.things
            .iter()
            .filter(|t| matches!(t, Thing::Grass { .. }))
            .count()
    }

    /// Decimal leaves in the finished save: every grass growth plus every
    /// stat.
    pub fn decimal_count(&self) -> usize {
        self.grass_count() + self.decimals.len()
    }

    /// Render the save as tab-indented, LF-terminated XML.
    pub fn build(&self) -> String {
        let mut out = String::new();
        out.push_str("<?xml version=\"1.0\" encoding=\"utf-8\"?>\n");
        out.push_str("<savegame>\n");
        out.push_str("\t<meta>\n\t\t<gameVersion>1.4.3901 rev261</gameVersion>\n");
        out.push_str("\t\t<modIds>\n\t\t\t<li>ludeon.rimworld</li>\n\t\t</modIds>\n\t</meta>\n");
        out.push_str("\t<game>\n\t\t<currentMapIndex>0</currentMapIndex>\n");
        out.push_str("\t\t<maps>\n\t\t\t<li>\n\t\t\t\t<uniqueID>0</uniqueID>\n\t\t\t\t<things>\n");

        for (n, thing) in self.things.iter().enumerate() {
            let id = 4000 + 13 * u32::try_from(n).unwrap_or(0);
            match thing {
                Thing::Grass { def, age } => write_grass(&mut out, def, id, *age),
                Thing::Other { class, def } => {
                    out.push_str(&format!(
                        "\t\t\t\t\t<thing Class=\"{class}\">\n\t\t\t\t\t\t<def>{def}</def>\n\t\t\t\t\t\t<id>{def}{id}</id>\n\t\t\t\t\t\t<pos>(104, 0, 87)</pos>\n\t\t\t\t\t</thing>\n"
                    ));
                }
            }
        }

        out.push_str("\t\t\t\t</things>\n\t\t\t</li>\n\t\t</maps>\n\t\t<stats>\n");
        for (name, value) in &self.decimals {
            out.push_str(&format!("\t\t\t<{name}>{value}</{name}>\n"));
        }
        out.push_str("\t\t</stats>\n\t</game>\n</savegame>\n");
        out
    }
}

fn write_grass(out: &mut String, def: &str, id: u32, age: Option<u32>) {
    let health = 5 + id % 81;
    let growth = (u64::from(id) * 2_654_435_761) % 100_000_000;
    out.push_str(&format!(
        "\t\t\t\t\t<thing Class=\"Plant\">\n\t\t\t\t\t\t<def>{def}</def>\n\t\t\t\t\t\t<id>{def}{id}</id>\n\t\t\t\t\t\t<pos>(12, 0, 40)</pos>\n\t\t\t\t\t\t<health>{health}</health>\n\t\t\t\t\t\t<growth>0.{growth:08}</growth>\n"
    ));
    if let Some(age) = age {
        out.push_str(&format!("\t\t\t\t\t\t<age>{age}</age>\n"));
    }
    out.push_str("\t\t\t\t\t</thing>\n");
}

/// A payload of `len` bytes that exercises every bit pattern position.
pub fn payload(len: usize) -> Vec<u8> {
    (0..len)
        .map(|i| u8::try_from((i * 151 + 17) % 256).unwrap_or(0))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn build_renders_every_thing_and_stat() {
        let save = SaveBuilder::new()
            .grasses(2, 1)
            .thing("Building", "Wall")
            .decimal("temperature", "-3.25")
            .build();
        assert_eq!(save.matches("<thing Class=\"Plant\">").count(), 3);
        assert_eq!(save.matches("<age>").count(), 2);
        assert!(save.contains("<thing Class=\"Building\">\n\t\t\t\t\t\t<def>Wall</def>"));
        assert!(save.contains("\t\t\t<temperature>-3.25</temperature>\n\t\t</stats>"));
        assert!(save.ends_with("</savegame>\n"));
    }
}
