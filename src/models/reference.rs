//! Reference entities: simple id + name lookup lists

use serde::{Deserialize, Serialize};

macro_rules! reference_entity {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
        #[serde(rename_all = "camelCase")]
        pub struct $name {
            pub id: String,
            #[serde(default)]
            pub name: String,
            /// Localized display name, when the backend carries one
            #[serde(default, skip_serializing_if = "Option::is_none")]
            pub local_name: Option<String>,
        }

        impl $name {
            pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
                Self {
                    id: id.into(),
                    name: name.into(),
                    local_name: None,
                }
            }
        }
    };
}

reference_entity!(
    /// Book category (fiction, reference, textbook, ...)
    Category
);
reference_entity!(Author);
reference_entity!(Publisher);
reference_entity!(
    /// Physical shelf location
    Location
);
reference_entity!(Language);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserializes_with_and_without_local_name() {
        let cat: Category =
            serde_json::from_str(r#"{"id": "c1", "name": "Fiction", "localName": "কথাসাহিত্য"}"#)
                .unwrap();
        assert_eq!(cat.local_name.as_deref(), Some("কথাসাহিত্য"));

        let author: Author = serde_json::from_str(r#"{"id": "a1", "name": "Herbert"}"#).unwrap();
        assert!(author.local_name.is_none());
    }
}
