//! Pure transforms over a metadata value; the store reads, applies one of them, and persists.

use crate::error::{Error, Result};

use super::{Attribute, MetaData};

/// Appends `tag` unless it is already there. Missing metadata starts out empty.
#[must_use]
pub fn add_tag(metadata: Option<MetaData>, tag: &str) -> MetaData {
	let mut metadata = metadata.unwrap_or_default();
	let tags = metadata.tags.get_or_insert_with(Vec::new);

	if !tags.iter().any(|t| t == tag) {
		tags.push(tag.to_string());
	}

	metadata
}

pub fn remove_tag(metadata: Option<MetaData>, tag: &str) -> Result<MetaData> {
	let mut metadata = metadata.ok_or_else(|| {
		Error::InvalidState(format!(
			"cannot remove tag '{tag}' from an entry without metadata"
		))
	})?;

	if let Some(tags) = metadata.tags.as_mut() {
		tags.retain(|t| t != tag);
	}

	Ok(metadata)
}

/// Sets an attribute: an existing key keeps its position and gets the new value, a new key is
/// appended.
#[must_use]
pub fn add_attribute(metadata: Option<MetaData>, (key, value): Attribute) -> MetaData {
	let mut metadata = metadata.unwrap_or_default();
	let attributes = metadata.attributes.get_or_insert_with(Vec::new);

	if let Some((_, existing)) = attributes.iter_mut().find(|(k, _)| *k == key) {
		*existing = value;
	} else {
		attributes.push((key, value));
	}

	metadata
}

/// Drops the attribute named `key`; an unknown key leaves the attributes untouched.
pub fn remove_attribute(metadata: Option<MetaData>, key: &str) -> Result<MetaData> {
	let mut metadata = metadata.ok_or_else(|| {
		Error::InvalidState(format!(
			"cannot remove attribute '{key}' from an entry without metadata"
		))
	})?;

	if let Some(attributes) = metadata.attributes.as_mut() {
		if let Some(idx) = attributes.iter().position(|(k, _)| k == key) {
			attributes.remove(idx);
		}
	}

	Ok(metadata)
}

#[cfg(test)]
mod tests {
	use super::*;

	use crate::{error::ErrorKind, metadata::AttributeValue};

	use pretty_assertions::assert_eq;

	fn fixture() -> MetaData {
		MetaData {
			attributes: Some(vec![
				("newAtt1".to_string(), true.into()),
				("newAtt2".to_string(), 46_i64.into()),
				("newAtt3".to_string(), "sfsds".into()),
			]),
			tags: Some(vec!["newTag1".to_string(), "newTag2".to_string()]),
			..Default::default()
		}
	}

	fn tags(tags: &[&str]) -> Option<Vec<String>> {
		Some(tags.iter().map(ToString::to_string).collect())
	}

	#[test]
	fn add_tag_appends() {
		assert_eq!(
			add_tag(Some(fixture()), "addedTag"),
			MetaData {
				tags: tags(&["newTag1", "newTag2", "addedTag"]),
				..fixture()
			}
		);
	}

	#[test]
	fn add_tag_skips_duplicates() {
		assert_eq!(add_tag(Some(fixture()), "newTag2"), fixture());
	}

	#[test]
	fn add_tag_on_missing_metadata() {
		assert_eq!(
			add_tag(None, "first"),
			MetaData {
				tags: tags(&["first"]),
				..Default::default()
			}
		);

		let untagged = MetaData {
			title: Some("Holidays".to_string()),
			..Default::default()
		};
		assert_eq!(
			add_tag(Some(untagged.clone()), "first"),
			MetaData {
				tags: tags(&["first"]),
				..untagged
			}
		);
	}

	#[test]
	fn remove_tag_filters() {
		assert_eq!(
			remove_tag(Some(fixture()), "newTag2").unwrap(),
			MetaData {
				tags: tags(&["newTag1"]),
				..fixture()
			}
		);
	}

	#[test]
	fn remove_tag_requires_metadata() {
		let err = remove_tag(None, "newTag2").unwrap_err();
		assert_eq!(err.kind(), ErrorKind::InvalidState);
	}

	#[test]
	fn remove_tag_without_tags_is_a_no_op() {
		let metadata = MetaData {
			attributes: fixture().attributes,
			..Default::default()
		};
		assert_eq!(remove_tag(Some(metadata.clone()), "t").unwrap(), metadata);
	}

	#[test]
	fn add_then_remove_tag_round_trips() {
		for original in [fixture(), MetaData::default()] {
			let added = add_tag(Some(original.clone()), "t");
			let removed = remove_tag(Some(added.clone()), "t").unwrap();
			let mut expected = added;
			expected.tags.as_mut().unwrap().retain(|t| t != "t");

			assert_eq!(removed, expected);
			assert_eq!(add_tag(Some(removed), "t"), add_tag(Some(original), "t"));
		}
	}

	#[test]
	fn add_attribute_appends() {
		let mut expected = fixture();
		expected
			.attributes
			.as_mut()
			.unwrap()
			.push(("newAttr".to_string(), true.into()));

		assert_eq!(
			add_attribute(Some(fixture()), ("newAttr".to_string(), true.into())),
			expected
		);
	}

	#[test]
	fn add_attribute_updates_in_place() {
		assert_eq!(
			add_attribute(Some(fixture()), ("newAtt1".to_string(), 147_i64.into())),
			MetaData {
				attributes: Some(vec![
					("newAtt1".to_string(), 147_i64.into()),
					("newAtt2".to_string(), 46_i64.into()),
					("newAtt3".to_string(), "sfsds".into()),
				]),
				..fixture()
			}
		);

		let two = MetaData {
			attributes: Some(vec![
				("a".to_string(), 1_i64.into()),
				("b".to_string(), 2_i64.into()),
			]),
			..Default::default()
		};
		assert_eq!(
			add_attribute(Some(two), ("a".to_string(), 99_i64.into())).attributes,
			Some(vec![
				("a".to_string(), AttributeValue::from(99_i64)),
				("b".to_string(), AttributeValue::from(2_i64)),
			])
		);
	}

	#[test]
	fn remove_attribute_drops_the_key() {
		assert_eq!(
			remove_attribute(Some(fixture()), "newAtt1").unwrap(),
			MetaData {
				attributes: Some(vec![
					("newAtt2".to_string(), 46_i64.into()),
					("newAtt3".to_string(), "sfsds".into()),
				]),
				..fixture()
			}
		);
	}

	#[test]
	fn remove_unknown_attribute_keeps_the_list() {
		assert_eq!(
			remove_attribute(Some(fixture()), "unknown").unwrap(),
			fixture()
		);
	}

	#[test]
	fn remove_attribute_requires_metadata() {
		let err = remove_attribute(None, "newAtt1").unwrap_err();
		assert_eq!(err.kind(), ErrorKind::InvalidState);
	}
}
