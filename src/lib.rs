//! Converts OpenSocial XML request payloads (activities, app data, messages,
//! albums, media items, people) into typed records ready to be rendered as JSON.
//!
//! ```
//! use opensocial_xml_input::{convert_app_data, Config};
//!
//! let xml = "<response><entry><key>sign</key><value>Virgo</value></entry></response>";
//! let data = convert_app_data(xml, &Config::new_with_defaults()).unwrap();
//! assert_eq!(data["sign"], "Virgo");
//! ```

use std::str::FromStr;

use log::{debug, warn};
use roxmltree::Node;
use serde_json::Value;

mod entities;
mod error;
mod xml;

pub use entities::{Activity, Album, AppData, Location, MediaItem, MediaType, Message, Name, Person};
pub use error::ConversionError;

use xml::Ns;

pub const OPENSOCIAL_NS: &str = "http://ns.opensocial.org/2008/opensocial";
pub const OSAPI_NS: &str = "http://opensocial.org/2008/opensocialapi";

/// Namespace URIs element names are resolved against.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Namespaces {
    /// Default namespace of every OpenSocial entity element
    pub opensocial: String,
    /// Namespace bound to the `osapi` prefix, used by message recipients
    pub osapi: String,
}

/// Defines how element names are matched while converting.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub namespaces: Namespaces,
    /// Accept elements without a namespace as OpenSocial elements. Request
    /// envelopes such as `<response>` usually carry none.
    pub allow_unqualified: bool,
}

impl Config {
    /// Uses the standard OpenSocial 2008 namespaces and accepts unqualified elements.
    pub fn new_with_defaults() -> Self {
        Config {
            namespaces: Namespaces {
                opensocial: OPENSOCIAL_NS.to_string(),
                osapi: OSAPI_NS.to_string(),
            },
            allow_unqualified: true,
        }
    }

    pub fn new_with_custom_values(opensocial: &str, osapi: &str, allow_unqualified: bool) -> Self {
        Config {
            namespaces: Namespaces {
                opensocial: opensocial.to_string(),
                osapi: osapi.to_string(),
            },
            allow_unqualified,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Config::new_with_defaults()
    }
}

/// The entity kinds a payload can be converted into, named after the REST services.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntityKind {
    Activities,
    AppData,
    Messages,
    People,
    Albums,
    MediaItems,
}

impl FromStr for EntityKind {
    type Err = ConversionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "activities" | "activity" => Ok(EntityKind::Activities),
            "appdata" => Ok(EntityKind::AppData),
            "messages" | "message" => Ok(EntityKind::Messages),
            "people" | "person" => Ok(EntityKind::People),
            "albums" | "album" => Ok(EntityKind::Albums),
            "mediaitems" | "mediaitem" => Ok(EntityKind::MediaItems),
            _ => Err(ConversionError::UnknownEntity(s.to_string())),
        }
    }
}

/// Converts `xml` as the given entity kind and renders the record as JSON.
pub fn convert(kind: EntityKind, xml: &str, config: &Config) -> Result<Value, ConversionError> {
    let value = match kind {
        EntityKind::Activities => serde_json::to_value(convert_activities(xml, config)?),
        EntityKind::AppData => serde_json::to_value(convert_app_data(xml, config)?),
        EntityKind::Messages => serde_json::to_value(convert_messages(xml, config)?),
        EntityKind::People => serde_json::to_value(convert_people(xml, config)?),
        EntityKind::Albums => serde_json::to_value(convert_albums(xml, config)?),
        EntityKind::MediaItems => serde_json::to_value(convert_media_items(xml, config)?),
    }?;
    Ok(value)
}

pub fn convert_activities(xml: &str, config: &Config) -> Result<Activity, ConversionError> {
    debug!("converting activity, {} bytes", xml.len());
    let doc = xml::parse(xml)?;
    let root = doc.root_element();
    let activity = xml::find_entity(&doc, &["activity"], config)
        .ok_or(ConversionError::MissingElement("activity"))?;

    // Atom-style envelopes keep id, title, summary and updated beside the payload
    let field = |name: &str| {
        xml::child_text(activity, name, config).or_else(|| {
            if activity == root {
                None
            } else {
                xml::child_text(root, name, config)
            }
        })
    };

    let mut media_items = Vec::new();
    if let Some(list) = xml::child(activity, "mediaItems", config) {
        for item in list.children().filter(|c| is_media_item(*c, config)) {
            media_items.push(media_item_from(item, config)?);
        }
    }

    Ok(Activity {
        id: field("id"),
        title: field("title"),
        body: field("summary"),
        stream_id: field("streamId"),
        stream_title: field("streamTitle"),
        updated: field("updated"),
        media_items,
    })
}

pub fn convert_app_data(xml: &str, config: &Config) -> Result<AppData, ConversionError> {
    debug!("converting app data, {} bytes", xml.len());
    let doc = xml::parse(xml)?;
    let root = doc.root_element();

    let entries: Vec<Node> = if xml::is_named(root, "entry", Ns::OpenSocial, config) {
        vec![root]
    } else {
        xml::children(root, "entry", config).collect()
    };
    if entries.is_empty() {
        return Err(ConversionError::MissingElement("entry"));
    }

    let mut data = AppData::new();
    for entry in entries {
        match xml::child_text(entry, "key", config) {
            Some(key) => {
                let value = xml::child_text(entry, "value", config).unwrap_or_default();
                data.insert(key, value);
            }
            None => warn!("skipping app data entry without a key"),
        }
    }
    Ok(data)
}

pub fn convert_messages(xml: &str, config: &Config) -> Result<Message, ConversionError> {
    debug!("converting message, {} bytes", xml.len());
    let doc = xml::parse(xml)?;
    let root = doc.root_element();

    let recipients: Vec<String> = root
        .descendants()
        .filter(|n| xml::is_named(*n, "recipient", Ns::Osapi, config))
        .map(xml::text)
        .collect();

    let message = Message {
        id: xml::child_text(root, "id", config),
        title: xml::child_text(root, "title", config),
        body: xml::child_text(root, "body", config),
        recipients,
    };
    if message == Message::default() {
        return Err(ConversionError::MissingElement("message"));
    }
    Ok(message)
}

pub fn convert_people(xml: &str, config: &Config) -> Result<Person, ConversionError> {
    debug!("converting person, {} bytes", xml.len());
    let doc = xml::parse(xml)?;
    let person = xml::find_entity(&doc, &["person"], config)
        .ok_or(ConversionError::MissingElement("person"))?;

    let name = xml::child(person, "name", config).map(|n| Name {
        formatted: xml::child_text(n, "formatted", config),
        given_name: xml::child_text(n, "givenName", config),
        family_name: xml::child_text(n, "familyName", config),
    });

    Ok(Person {
        id: xml::child_text(person, "id", config),
        display_name: xml::child_text(person, "displayName", config),
        name,
        gender: xml::child_text(person, "gender", config),
        birthday: xml::child_text(person, "birthday", config),
        thumbnail_url: xml::child_text(person, "thumbnailUrl", config),
        profile_url: xml::child_text(person, "profileUrl", config),
        about_me: xml::child_text(person, "aboutMe", config),
    })
}

pub fn convert_albums(xml: &str, config: &Config) -> Result<Album, ConversionError> {
    debug!("converting album, {} bytes", xml.len());
    let doc = xml::parse(xml)?;
    let album = xml::find_entity(&doc, &["album"], config)
        .ok_or(ConversionError::MissingElement("album"))?;

    let location = match xml::child(album, "location", config) {
        Some(loc) => Some(Location {
            latitude: xml::child_number(loc, "latitude", config)?,
            longitude: xml::child_number(loc, "longitude", config)?,
        }),
        None => None,
    };

    Ok(Album {
        id: xml::child_text(album, "id", config),
        thumbnail_url: xml::child_text(album, "thumbnailUrl", config),
        title: xml::child_text(album, "caption", config),
        description: xml::child_text(album, "description", config),
        owner_id: xml::child_text(album, "ownerId", config),
        location,
    })
}

pub fn convert_media_items(xml: &str, config: &Config) -> Result<MediaItem, ConversionError> {
    debug!("converting media item, {} bytes", xml.len());
    let doc = xml::parse(xml)?;
    let item = xml::find_entity(&doc, &["mediaItem", "MediaItem"], config)
        .ok_or(ConversionError::MissingElement("mediaItem"))?;
    media_item_from(item, config)
}

fn is_media_item(node: Node, config: &Config) -> bool {
    xml::is_named(node, "MediaItem", Ns::OpenSocial, config)
        || xml::is_named(node, "mediaItem", Ns::OpenSocial, config)
}

fn media_item_from(item: Node, config: &Config) -> Result<MediaItem, ConversionError> {
    let media_type = match xml::child_value(item, "type", config) {
        Some(raw) => Some(raw.parse::<MediaType>()?),
        None => None,
    };

    Ok(MediaItem {
        id: xml::child_text(item, "id", config),
        mime_type: xml::child_text(item, "mimeType", config),
        media_type,
        url: xml::child_text(item, "url", config),
        thumbnail_url: xml::child_text(item, "thumbnailUrl", config),
        album_id: xml::child_text(item, "albumId", config),
    })
}
