//! Collection and role identifiers plus document helpers.

use mongodb::bson::{doc, oid::ObjectId, Bson, Document};
use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumIter, EnumString};
use utoipa::ToSchema;

/// Named collections in the `farm` database.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, AsRefStr)]
#[strum(serialize_all = "lowercase")]
pub enum Collection {
    /// Farmer accounts.
    Farmers,
    /// Landowner accounts.
    Landowners,
    /// Land listings.
    Lands,
    /// Free-form form submissions.
    Forms,
}

/// Account role. Each role owns exactly one collection.
///
/// Declaration order is lookup order: farmers are always searched first.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    EnumIter,
    ToSchema,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Role {
    /// Works land.
    Farmer,
    /// Lists land.
    Landowner,
}

impl Role {
    /// Collection holding accounts of this role.
    pub fn collection(&self) -> Collection {
        match self {
            Role::Farmer => Collection::Farmers,
            Role::Landowner => Collection::Landowners,
        }
    }
}

/// Filter matching a single document by `_id`.
pub fn id_filter(id: ObjectId) -> Document {
    doc! { "_id": id }
}

/// Render an inserted `_id` the way clients see it.
pub fn id_to_string(id: &Bson) -> String {
    match id {
        Bson::ObjectId(oid) => oid.to_hex(),
        Bson::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Convert a stored document into response JSON, with `_id` as a plain string.
pub fn document_to_json(mut document: Document) -> serde_json::Value {
    if let Some(id) = document.remove("_id") {
        let mut out = doc! { "_id": id_to_string(&id) };
        for (key, value) in document {
            out.insert(key, value);
        }
        document = out;
    }
    Bson::Document(document).into_relaxed_extjson()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;
    use std::str::FromStr;
    use strum::IntoEnumIterator;

    #[test]
    fn role_lookup_order_is_farmer_first() {
        let order: Vec<Role> = Role::iter().collect();
        assert_eq!(order, vec![Role::Farmer, Role::Landowner]);
    }

    #[test]
    fn role_maps_to_plural_collection() {
        assert_eq!(Role::Farmer.collection().as_ref(), "farmers");
        assert_eq!(Role::Landowner.collection().as_ref(), "landowners");
        assert_eq!(Collection::Lands.to_string(), "lands");
    }

    #[test]
    fn role_parses_lowercase_only() {
        assert_eq!(Role::from_str("farmer").unwrap(), Role::Farmer);
        assert!(Role::from_str("admin").is_err());
        assert!(serde_json::from_value::<Role>(json!("landowner")).is_ok());
        assert!(serde_json::from_value::<Role>(json!("admins")).is_err());
    }

    #[test]
    fn document_to_json_stringifies_object_id() {
        let oid = ObjectId::new();
        let value = document_to_json(doc! { "_id": oid, "title": "North field", "area": 4.5 });

        assert_eq!(
            value,
            json!({ "_id": oid.to_hex(), "title": "North field", "area": 4.5 })
        );
    }

    #[test]
    fn document_to_json_without_id_is_unchanged() {
        let value = document_to_json(doc! { "owner_id": "abc", "price_per_acre": Bson::Null });
        assert_eq!(value, json!({ "owner_id": "abc", "price_per_acre": null }));
    }
}
