//! Trait abstraction for the catalog client to enable mocking in tests

use crate::state::{Link, Profile, Section};
use anyhow::Result;
use async_trait::async_trait;

/// Trait for catalog daemon operations, enabling mocking in tests
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CatalogClientTrait: Send + Sync {
    /// Check if the catalog daemon is reachable
    async fn check_connection(&self) -> bool;

    /// Profile of the signed-in user
    async fn get_profile(&mut self) -> Result<Profile>;

    /// List all sections
    async fn list_sections(&mut self) -> Result<Vec<Section>>;

    /// List links, restricted to one section unless the slug is empty
    async fn list_links(&mut self, section_slug: &str) -> Result<Vec<Link>>;

    /// Create a link document; the record's id field is ignored and a fresh
    /// id is generated. Returns the stored id.
    async fn create_link(&mut self, link: &Link) -> Result<String>;

    /// Update an existing link document
    async fn update_link(&mut self, link: &Link) -> Result<()>;

    /// Delete a link document
    async fn delete_link(&mut self, id: &str) -> Result<()>;

    /// Create a section document. Returns the stored id.
    async fn create_section(
        &mut self,
        name: &str,
        slug: &str,
        icon: &str,
        order: u32,
    ) -> Result<String>;

    /// Delete a section document
    async fn delete_section(&mut self, id: &str) -> Result<()>;
}
