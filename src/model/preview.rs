/// Metadata extracted from a fetched board post, as rendered into the
/// preview embed and stored in the TTL cache.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PagePreview {
    pub title: String,
    pub gallery: String,
    pub image: Option<String>,
    pub summary: Option<String>,
}
