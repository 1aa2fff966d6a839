use serde::{Deserialize, Serialize};

/// Display-ready map reference attached to responses when map embedding
/// is enabled. The image URL points at the upstream static-map endpoint,
/// the embed URL at the interactive embed endpoint; the plain link is
/// always safe to show without any credential.
#[derive(Clone, Serialize, Deserialize, Debug)]
pub struct MapRef {
    pub image_url: String,
    pub embed_url: Option<String>,
    pub link: String,
}
