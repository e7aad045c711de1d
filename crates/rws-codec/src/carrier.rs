use std::borrow::Cow;

/// The five sub-fields of a grass thing, in document order.
///
/// ```text
/// ┌────────┬──────────────────────┬──────────┬───────────────────────┐
/// │ Field  │ Example              │ Payload  │ Stored as             │
/// ├────────┼──────────────────────┼──────────┼───────────────────────┤
/// │ Def    │ PlantTallGrass       │ -        │ untouched             │
/// │ Id     │ PlantTallGrass73105  │ 18 bits  │ def + decimal number  │
/// │ Health │ 42                   │ 6 bits   │ bits + 5              │
/// │ Growth │ 0.00418211           │ 26 bits  │ bits / 10^8           │
/// │ Age    │ 906112               │ 20 bits  │ decimal integer       │
/// └────────┴──────────────────────┴──────────┴───────────────────────┘
/// ```
///
/// `Age` is optional: some saved plants have no age element at all.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum GrassField {
    Def,
    Id,
    Health,
    Growth,
    Age,
}

impl GrassField {
    pub const ALL: [GrassField; 5] = [
        GrassField::Def,
        GrassField::Id,
        GrassField::Health,
        GrassField::Growth,
        GrassField::Age,
    ];

    /// Element name of this field inside a save file's `<thing>`.
    pub const fn tag(self) -> &'static str {
        match self {
            GrassField::Def => "def",
            GrassField::Id => "id",
            GrassField::Health => "health",
            GrassField::Growth => "growth",
            GrassField::Age => "age",
        }
    }
}

/// Read access to a grass carrier.
///
/// Returns `None` when the sub-field is structurally absent.
pub trait GrassView {
    fn field(&self, field: GrassField) -> Option<Cow<'_, str>>;
}

/// Write access to a grass carrier.
pub trait GrassEdit: GrassView {
    /// Replace the text of a sub-field. Returns `false` if the field does
    /// not exist on this carrier; the codec never creates fields.
    fn set_field(&mut self, field: GrassField, text: String) -> bool;
}

/// Read access to a decimal-valued leaf.
pub trait DecimalView {
    fn text(&self) -> Option<Cow<'_, str>>;
}

/// Write access to a decimal-valued leaf.
pub trait DecimalEdit: DecimalView {
    fn set_text(&mut self, text: String);
}

impl<T: GrassView + ?Sized> GrassView for &T {
    fn field(&self, field: GrassField) -> Option<Cow<'_, str>> {
        (**self).field(field)
    }
}

impl<T: GrassView + ?Sized> GrassView for &mut T {
    fn field(&self, field: GrassField) -> Option<Cow<'_, str>> {
        (**self).field(field)
    }
}

impl<T: GrassEdit + ?Sized> GrassEdit for &mut T {
    fn set_field(&mut self, field: GrassField, text: String) -> bool {
        (**self).set_field(field, text)
    }
}

impl<T: DecimalView + ?Sized> DecimalView for &T {
    fn text(&self) -> Option<Cow<'_, str>> {
        (**self).text()
    }
}

impl<T: DecimalView + ?Sized> DecimalView for &mut T {
    fn text(&self) -> Option<Cow<'_, str>> {
        (**self).text()
    }
}

impl<T: DecimalEdit + ?Sized> DecimalEdit for &mut T {
    fn set_text(&mut self, text: String) {
        (**self).set_text(text);
    }
}

/// An in-memory grass carrier, detached from any document.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Grass {
    pub def: String,
    pub id: String,
    pub health: String,
    pub growth: String,
    pub age: Option<String>,
}

impl Grass {
    pub fn new(def: &str, number: u32, health: u32, growth: &str, age: Option<u32>) -> Self {
        Self {
            def: def.to_string(),
            id: format!("{def}{number}"),
            health: health.to_string(),
            growth: growth.to_string(),
            age: age.map(|a| a.to_string()),
        }
    }
}

impl GrassView for Grass {
    fn field(&self, field: GrassField) -> Option<Cow<'_, str>> {
        let text = match field {
            GrassField::Def => &self.def,
            GrassField::Id => &self.id,
            GrassField::Health => &self.health,
            GrassField::Growth => &self.growth,
            GrassField::Age => self.age.as_ref()?,
        };
        Some(Cow::Borrowed(text.as_str()))
    }
}

impl GrassEdit for Grass {
    fn set_field(&mut self, field: GrassField, text: String) -> bool {
        let slot = match field {
            GrassField::Def => &mut self.def,
            GrassField::Id => &mut self.id,
            GrassField::Health => &mut self.health,
            GrassField::Growth => &mut self.growth,
            GrassField::Age => match self.age.as_mut() {
                Some(age) => age,
                None => return false,
            },
        };
        *slot = text;
        true
    }
}

/// An in-memory decimal leaf.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FloatCell(pub String);

impl FloatCell {
    pub fn new(text: &str) -> Self {
        Self(text.to_string())
    }
}

impl DecimalView for FloatCell {
    fn text(&self) -> Option<Cow<'_, str>> {
        Some(Cow::Borrowed(self.0.as_str()))
    }
}

impl DecimalEdit for FloatCell {
    fn set_text(&mut self, text: String) {
        self.0 = text;
    }
}
