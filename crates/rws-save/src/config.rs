use rws_codec::SchemeKind;

/// Where carriers live in a save and how the result is written back.
///
/// ```text
/// ┌──────────────┬──────────────────────────────┬───────────────────────────┐
/// │ Field        │ Default                      │ Used by                   │
/// ├──────────────┼──────────────────────────────┼───────────────────────────┤
/// │ scheme       │ grass                        │ DefaultSteganographer     │
/// │ things_path  │ game/maps/li/things          │ grass discovery           │
/// │ plant_class  │ Plant                        │ grass discovery           │
/// │ grass_defs   │ PlantGrass, PlantTallGrass   │ grass discovery           │
/// │ indent       │ two spaces                   │ pretty printer            │
/// └──────────────┴──────────────────────────────┴───────────────────────────┘
/// ```
///
/// `things_path` is relative to the document root (`<savegame>`); each
/// segment picks the first child with that name.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SaveConfig {
    pub scheme: SchemeKind,
    pub things_path: Vec<String>,
    pub plant_class: String,
    pub grass_defs: Vec<String>,
    pub indent: String,
}

impl SaveConfig {
    /// Default configuration with a different scheme.
    pub fn with_scheme(scheme: SchemeKind) -> Self {
        Self {
            scheme,
            ..Self::default()
        }
    }

    /// Slash-joined form of `things_path`, for messages.
    pub fn things_path_display(&self) -> String {
        self.things_path.join("/")
    }
}

impl Default for SaveConfig {
    fn default() -> Self {
        Self {
            scheme: SchemeKind::default(),
            things_path: ["game", "maps", "li", "things"].map(String::from).to_vec(),
            plant_class: "Plant".to_string(),
            grass_defs: vec!["PlantGrass".to_string(), "PlantTallGrass".to_string()],
            indent: "  ".to_string(),
        }
    }
}
