use std::collections::BTreeMap;

use once_cell::sync::Lazy;

const AUTHOR: &[&str] = &[
    "id",
    "username",
    "email",
    "status",
    "created_at",
    "is_verified",
];

const PROFILE: &[&str] = &[
    "id",
    "author_id",
    "first_name",
    "last_name",
    "age",
    "bio",
    "city",
    "country",
    "phone",
    "created_at",
    "updated_at",
];

const POST: &[&str] = &[
    "id",
    "author_id",
    "title",
    "content",
    "status",
    "tags",
    "views",
    "likes",
    "created_at",
    "updated_at",
    "published_at",
];

const CAREER: &[&str] = &[
    "careerId",
    "careerType",
    "area",
    "name",
    "subtitle",
    "imageLink",
    "creationDate",
    "modificationDate",
    "publicationDate",
    "published",
    "creator",
    "modifier",
];

const TESTIMONY: &[&str] = &[
    "testimonyId",
    "text",
    "name",
    "lastname",
    "career",
    "creationDate",
];

const NEWS: &[&str] = &[
    "newsId",
    "area",
    "career",
    "title",
    "text",
    "videoLink",
    "imagesLink",
    "creationDate",
    "publicationDate",
    "published",
];

const USER: &[&str] = &["userId", "name", "lastname"];

/// Relation path → filterable attribute names, for UI autocompletion.
///
/// Advisory only: neither the composers nor the validator consult it.
pub static ATTRIBUTES: Lazy<BTreeMap<&'static str, &'static [&'static str]>> = Lazy::new(|| {
    BTreeMap::from([
        ("author", AUTHOR),
        ("author.profile", PROFILE),
        ("author.posts", POST),
        ("career", CAREER),
        ("career.testimonies", TESTIMONY),
        ("career.news", NEWS),
        ("career.creator_user", USER),
    ])
});

/// Entries of [`ATTRIBUTES`] whose relation path starts with `prefix`.
/// An empty prefix returns the whole table.
pub fn available_attributes(prefix: &str) -> BTreeMap<&'static str, &'static [&'static str]> {
    ATTRIBUTES
        .iter()
        .filter(|(path, _)| path.starts_with(prefix))
        .map(|(path, attributes)| (*path, *attributes))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prefix_filter() {
        let author = available_attributes("author");
        assert_eq!(
            author.keys().copied().collect::<Vec<_>>(),
            vec!["author", "author.posts", "author.profile"]
        );
        assert_eq!(author["author.profile"], ATTRIBUTES["author.profile"]);

        let posts = available_attributes("author.po");
        assert_eq!(posts.len(), 1);
        assert!(posts["author.posts"].contains(&"published_at"));
    }

    #[test]
    fn test_empty_and_unknown_prefix() {
        assert_eq!(available_attributes("").len(), ATTRIBUTES.len());
        assert!(available_attributes("invoice").is_empty());
    }
}
