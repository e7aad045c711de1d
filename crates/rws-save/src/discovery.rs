use std::borrow::Cow;
use std::ops::{Deref, DerefMut};

use rws_codec::{DecimalEdit, DecimalText, DecimalView, GrassEdit, GrassField, GrassView};
use xmltree::{Element, XMLNode};

use crate::config::SaveConfig;
use crate::error::SaveError;

/// A grass `<thing>` element seen through the codec's carrier traits.
///
/// `E` is `&Element` for decoding and `&mut Element` for encoding.
#[derive(Debug)]
pub struct GrassElement<E>(pub E);

/// A decimal leaf element seen through the codec's carrier traits.
#[derive(Debug)]
pub struct FloatElement<E>(pub E);

impl<E: Deref<Target = Element>> GrassView for GrassElement<E> {
    fn field(&self, field: GrassField) -> Option<Cow<'_, str>> {
        let child = self.0.get_child(field.tag())?;
        Some(child.get_text().unwrap_or(Cow::Borrowed("")))
    }
}

impl<E: DerefMut<Target = Element>> GrassEdit for GrassElement<E> {
    fn set_field(&mut self, field: GrassField, text: String) -> bool {
        match self.0.get_mut_child(field.tag()) {
            Some(child) => {
                replace_text(child, text);
                true
            }
            None => false,
        }
    }
}

impl<E: Deref<Target = Element>> DecimalView for FloatElement<E> {
    fn text(&self) -> Option<Cow<'_, str>> {
        self.0.get_text()
    }
}

impl<E: DerefMut<Target = Element>> DecimalEdit for FloatElement<E> {
    fn set_text(&mut self, text: String) {
        replace_text(&mut self.0, text);
    }
}

fn replace_text(element: &mut Element, text: String) {
    element.children = vec![XMLNode::Text(text)];
}

/// Grass things under the configured things path, in document order.
///
/// # Errors
///
/// Returns [`SaveError::MissingPath`] if the path does not resolve.
pub fn find_grass<'a>(
    root: &'a Element,
    config: &SaveConfig,
) -> Result<Vec<GrassElement<&'a Element>>, SaveError> {
    let mut things = root;
    for segment in &config.things_path {
        things = things.get_child(segment.as_str()).ok_or_else(|| missing(config))?;
    }
    Ok(things
        .children
        .iter()
        .filter_map(|node| match node {
            XMLNode::Element(thing) if is_grass(thing, config) => Some(GrassElement(thing)),
            _ => None,
        })
        .collect())
}

/// Mutable counterpart of [`find_grass`].
///
/// # Errors
///
/// Returns [`SaveError::MissingPath`] if the path does not resolve.
pub fn find_grass_mut<'a>(
    root: &'a mut Element,
    config: &SaveConfig,
) -> Result<Vec<GrassElement<&'a mut Element>>, SaveError> {
    let mut things = root;
    for segment in &config.things_path {
        things = things
            .get_mut_child(segment.as_str())
            .ok_or_else(|| missing(config))?;
    }
    Ok(things
        .children
        .iter_mut()
        .filter_map(|node| match node {
            XMLNode::Element(thing) if is_grass(thing, config) => Some(GrassElement(thing)),
            _ => None,
        })
        .collect())
}

/// Every decimal leaf in the document, root first, in document order.
pub fn find_floats(root: &Element) -> Vec<FloatElement<&Element>> {
    let mut out = Vec::new();
    collect_floats(root, &mut out);
    out
}

/// Mutable counterpart of [`find_floats`].
pub fn find_floats_mut(root: &mut Element) -> Vec<FloatElement<&mut Element>> {
    let mut out = Vec::new();
    collect_floats_mut(root, &mut out);
    out
}

fn collect_floats<'a>(element: &'a Element, out: &mut Vec<FloatElement<&'a Element>>) {
    if is_float_leaf(element) {
        out.push(FloatElement(element));
        return;
    }
    for node in &element.children {
        if let XMLNode::Element(child) = node {
            collect_floats(child, out);
        }
    }
}

fn collect_floats_mut<'a>(element: &'a mut Element, out: &mut Vec<FloatElement<&'a mut Element>>) {
    if is_float_leaf(element) {
        out.push(FloatElement(element));
        return;
    }
    for node in &mut element.children {
        if let XMLNode::Element(child) = node {
            collect_floats_mut(child, out);
        }
    }
}

/// A `Class="Plant"` thing whose `def` names one of the grass defs.
pub fn is_grass(thing: &Element, config: &SaveConfig) -> bool {
    if thing.attributes.get("Class") != Some(&config.plant_class) {
        return false;
    }
    thing
        .get_child("def")
        .and_then(Element::get_text)
        .is_some_and(|def| config.grass_defs.iter().any(|g| *g == def))
}

/// No child elements, and text that parses as a decimal with a `.` after
/// at least one character.
pub fn is_float_leaf(element: &Element) -> bool {
    let has_child = element
        .children
        .iter()
        .any(|node| matches!(node, XMLNode::Element(_)));
    if has_child {
        return false;
    }
    let Some(text) = element.get_text() else {
        return false;
    };
    text.find('.').is_some_and(|at| at > 0) && DecimalText::parse(&text).is_some()
}

fn missing(config: &SaveConfig) -> SaveError {
    SaveError::MissingPath {
        path: config.things_path_display(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::load;

    const SAVE: &str = r#"<savegame>
	<meta><gameVersion>1.4.3901 rev261</gameVersion></meta>
	<game>
		<tickManager><ticksGame>1234567</ticksGame></tickManager>
		<maps>
			<li>
				<things>
					<thing Class="Plant">
						<def>PlantGrass</def>
						<id>PlantGrass101</id>
						<health>85</health>
						<growth>0.73561209</growth>
						<age>906112</age>
					</thing>
					<thing Class="Building">
						<def>Wall</def>
						<id>Wall102</id>
					</thing>
					<thing Class="Plant">
						<def>PlantTreeOak</def>
						<id>PlantTreeOak103</id>
					</thing>
					<thing Class="Plant">
						<def>PlantTallGrass</def>
						<id>PlantTallGrass104</id>
						<health>60</health>
						<growth>1</growth>
					</thing>
				</things>
			</li>
		</maps>
		<weather><temperature>-3.25</temperature></weather>
	</game>
</savegame>"#;

    #[test]
    fn grass_is_filtered_by_class_and_def() {
        let root = load(SAVE).unwrap();
        let grass = find_grass(&root, &SaveConfig::default()).unwrap();
        let ids: Vec<_> = grass
            .iter()
            .map(|g| g.field(GrassField::Id).unwrap().into_owned())
            .collect();
        assert_eq!(ids, ["PlantGrass101", "PlantTallGrass104"]);
        assert!(grass[1].field(GrassField::Age).is_none());
    }

    #[test]
    fn missing_things_path() {
        let root = load("<savegame><game/></savegame>").unwrap();
        let err = find_grass(&root, &SaveConfig::default()).unwrap_err();
        assert!(matches!(err, SaveError::MissingPath { ref path } if path == "game/maps/li/things"));
    }

    #[test]
    fn editing_grass_rewrites_element_text() {
        let mut root = load(SAVE).unwrap();
        {
            let mut grass = find_grass_mut(&mut root, &SaveConfig::default()).unwrap();
            assert!(grass[0].set_field(GrassField::Health, "7".into()));
            assert!(!grass[1].set_field(GrassField::Age, "1".into()));
        }
        let grass = find_grass(&root, &SaveConfig::default()).unwrap();
        assert_eq!(grass[0].field(GrassField::Health).as_deref(), Some("7"));
    }

    #[test]
    fn floats_are_decimal_leaves() {
        let root = load(SAVE).unwrap();
        let texts: Vec<_> = find_floats(&root)
            .iter()
            .map(|f| f.text().unwrap().into_owned())
            .collect();
        // "1.4.3901 rev261" is not a decimal; "1" has no point.
        assert_eq!(texts, ["0.73561209", "-3.25"]);
    }

    #[test]
    fn float_leaf_rules() {
        let leaf = |text: &str| {
            let mut e = Element::new("v");
            e.children.push(XMLNode::Text(text.to_string()));
            is_float_leaf(&e)
        };
        assert!(leaf("12.5"));
        assert!(leaf("3."));
        assert!(!leaf(".5"));
        assert!(leaf("-.5"));
        assert!(leaf("1.5e3"));
        assert!(leaf("1.5E-05"));
        assert!(!leaf("1e5"));
        assert!(!leaf("1.5e"));
        assert!(!leaf("42"));
        assert!(!is_float_leaf(&Element::new("empty")));
    }

    #[test]
    fn exponent_and_signed_fraction_leaves_are_carriers() {
        let root =
            load("<r><a>1.5</a><b>-.5</b><c>1.5E-05</c><d>2.5</d><e>3.5</e><f>4.5</f></r>")
                .unwrap();
        let texts: Vec<_> = find_floats(&root)
            .iter()
            .map(|f| f.text().unwrap().into_owned())
            .collect();
        assert_eq!(texts, ["1.5", "-.5", "1.5E-05", "2.5", "3.5", "4.5"]);
    }

    #[test]
    fn float_edits_are_visible_to_later_scans() {
        let mut root = load(SAVE).unwrap();
        for mut float in find_floats_mut(&mut root) {
            float.set_text("9.001".into());
        }
        let texts: Vec<_> = find_floats(&root)
            .iter()
            .map(|f| f.text().unwrap().into_owned())
            .collect();
        assert_eq!(texts, ["9.001", "9.001"]);
    }
}
