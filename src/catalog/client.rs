//! gRPC client for communicating with the catalog daemon
//!
//! The daemon fronts the document store holding the link catalog; this
//! module maps its wire types into the domain types in `crate::state`.

use crate::catalog::traits::CatalogClientTrait;
use crate::state::{Link, LinkKind, OpenTarget, Profile, Role, Section};
use anyhow::{anyhow, Result};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

// Include the generated proto types
pub mod proto {
    tonic::include_proto!("linkdeck");
}

use proto::linkdeck_catalog_client::LinkdeckCatalogClient;

/// Default daemon address
const DEFAULT_ADDRESS: &str = "http://127.0.0.1:50161";

/// Client for communicating with the catalog daemon
pub struct CatalogClient {
    /// The gRPC client
    client: Option<LinkdeckCatalogClient<tonic::transport::Channel>>,
    /// The daemon address
    address: String,
}

impl CatalogClient {
    /// Create a new catalog client.
    ///
    /// The address is taken from `LINKDECK_CATALOG_ADDRESS`, then the
    /// configured address, then the default.
    pub async fn new(configured_address: Option<String>) -> Result<Self> {
        let address = std::env::var("LINKDECK_CATALOG_ADDRESS")
            .ok()
            .or(configured_address)
            .unwrap_or_else(|| DEFAULT_ADDRESS.to_string());

        // Try to connect to the daemon
        let client = match LinkdeckCatalogClient::connect(address.clone()).await {
            Ok(client) => Some(client),
            Err(_) => None,
        };

        Ok(Self { client, address })
    }

    /// Ensure connection is established
    async fn ensure_connected(
        &mut self,
    ) -> Result<&mut LinkdeckCatalogClient<tonic::transport::Channel>> {
        if self.client.is_none() {
            self.client = Some(
                LinkdeckCatalogClient::connect(self.address.clone())
                    .await
                    .map_err(|e| anyhow!("Failed to connect to catalog daemon: {}", e))?,
            );
        }
        self.client
            .as_mut()
            .ok_or_else(|| anyhow!("Client not connected"))
    }
}

#[async_trait]
impl CatalogClientTrait for CatalogClient {
    async fn check_connection(&self) -> bool {
        self.client.is_some()
    }

    async fn get_profile(&mut self) -> Result<Profile> {
        let client = self.ensure_connected().await?;

        let request = tonic::Request::new(proto::GetProfileRequest {});

        let response = client
            .get_profile(request)
            .await
            .map_err(|e| anyhow!("Failed to get profile: {}", e))?;

        let profile = response.into_inner();
        Ok(Profile {
            uid: profile.uid,
            email: profile.email,
            display_name: profile.display_name,
            role: parse_role(&profile.role),
        })
    }

    async fn list_sections(&mut self) -> Result<Vec<Section>> {
        let client = self.ensure_connected().await?;

        let request = tonic::Request::new(proto::ListSectionsRequest {});

        let response = client
            .list_sections(request)
            .await
            .map_err(|e| anyhow!("Failed to list sections: {}", e))?;

        let sections = response
            .into_inner()
            .sections
            .into_iter()
            .map(|s| Section {
                id: s.id,
                slug: s.slug,
                name: s.name,
                icon: s.icon,
                order: s.order,
            })
            .collect();

        Ok(sections)
    }

    async fn list_links(&mut self, section_slug: &str) -> Result<Vec<Link>> {
        let client = self.ensure_connected().await?;

        let request = tonic::Request::new(proto::ListLinksRequest {
            section_slug: section_slug.to_string(),
        });

        let response = client
            .list_links(request)
            .await
            .map_err(|e| anyhow!("Failed to list links: {}", e))?;

        let links = response
            .into_inner()
            .links
            .into_iter()
            .map(|l| Link {
                id: l.id,
                name: l.name,
                url: l.url,
                section: l.section,
                kind: parse_kind(&l.kind),
                order: l.order,
                description: if l.description.is_empty() {
                    None
                } else {
                    Some(l.description)
                },
                open_in: parse_open_in(&l.open_in),
                created_at: parse_timestamp(&l.created_at),
                updated_at: parse_timestamp(&l.updated_at),
            })
            .collect();

        Ok(links)
    }

    async fn create_link(&mut self, link: &Link) -> Result<String> {
        let client = self.ensure_connected().await?;

        // Document ids are generated on the client, document-store style
        let id = Uuid::new_v4().to_string();

        let request = tonic::Request::new(proto::CreateLinkRequest {
            id,
            name: link.name.clone(),
            url: link.url.clone(),
            section: link.section.clone(),
            kind: link.kind.label().to_string(),
            order: link.order,
            description: link.description.clone().unwrap_or_default(),
            open_in: link.open_in.label().to_string(),
        });

        let response = client
            .create_link(request)
            .await
            .map_err(|e| anyhow!("Failed to create link: {}", e))?;

        mutation_result("create link", response.into_inner())
    }

    async fn update_link(&mut self, link: &Link) -> Result<()> {
        let client = self.ensure_connected().await?;

        let request = tonic::Request::new(proto::UpdateLinkRequest {
            id: link.id.clone(),
            name: link.name.clone(),
            url: link.url.clone(),
            section: link.section.clone(),
            kind: link.kind.label().to_string(),
            order: link.order,
            description: link.description.clone().unwrap_or_default(),
            open_in: link.open_in.label().to_string(),
        });

        let response = client
            .update_link(request)
            .await
            .map_err(|e| anyhow!("Failed to update link: {}", e))?;

        mutation_result("update link", response.into_inner()).map(|_| ())
    }

    async fn delete_link(&mut self, id: &str) -> Result<()> {
        let client = self.ensure_connected().await?;

        let request = tonic::Request::new(proto::DeleteLinkRequest { id: id.to_string() });

        let response = client
            .delete_link(request)
            .await
            .map_err(|e| anyhow!("Failed to delete link: {}", e))?;

        mutation_result("delete link", response.into_inner()).map(|_| ())
    }

    async fn create_section(
        &mut self,
        name: &str,
        slug: &str,
        icon: &str,
        order: u32,
    ) -> Result<String> {
        let client = self.ensure_connected().await?;

        let request = tonic::Request::new(proto::CreateSectionRequest {
            id: Uuid::new_v4().to_string(),
            slug: slug.to_string(),
            name: name.to_string(),
            icon: icon.to_string(),
            order,
        });

        let response = client
            .create_section(request)
            .await
            .map_err(|e| anyhow!("Failed to create section: {}", e))?;

        mutation_result("create section", response.into_inner())
    }

    async fn delete_section(&mut self, id: &str) -> Result<()> {
        let client = self.ensure_connected().await?;

        let request = tonic::Request::new(proto::DeleteSectionRequest { id: id.to_string() });

        let response = client
            .delete_section(request)
            .await
            .map_err(|e| anyhow!("Failed to delete section: {}", e))?;

        mutation_result("delete section", response.into_inner()).map(|_| ())
    }
}

/// Unwrap a daemon mutation response, surfacing its error field
fn mutation_result(action: &str, response: proto::MutationResponse) -> Result<String> {
    if response.success {
        Ok(response.id)
    } else {
        Err(anyhow!("Failed to {action}: {}", response.error))
    }
}

/// Parse an ISO timestamp string to DateTime<Utc>
fn parse_timestamp(s: &str) -> DateTime<Utc> {
    if s.is_empty() {
        return Utc::now();
    }
    DateTime::parse_from_rfc3339(s)
        .map(|dt| dt.with_timezone(&Utc))
        .unwrap_or_else(|_| Utc::now())
}

/// Map a wire role string, defaulting to viewer
fn parse_role(s: &str) -> Role {
    match s {
        "admin" => Role::Admin,
        _ => Role::Viewer,
    }
}

/// Map a wire link kind, defaulting to embed
fn parse_kind(s: &str) -> LinkKind {
    match s {
        "external" => LinkKind::External,
        "protocol" => LinkKind::Protocol,
        _ => LinkKind::Embed,
    }
}

/// Map a wire open-target, defaulting to pane
fn parse_open_in(s: &str) -> OpenTarget {
    match s {
        "new-tab" => OpenTarget::NewTab,
        _ => OpenTarget::Pane,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_timestamp_rfc3339() {
        let parsed = parse_timestamp("2024-05-01T12:00:00Z");
        assert_eq!(parsed.to_rfc3339(), "2024-05-01T12:00:00+00:00");
    }

    #[test]
    fn test_parse_timestamp_garbage_falls_back() {
        // Falls back to now rather than failing the whole record
        let before = Utc::now();
        let parsed = parse_timestamp("yesterday-ish");
        assert!(parsed >= before);
    }

    #[test]
    fn test_mutation_result_surfaces_daemon_error() {
        let ok = proto::MutationResponse {
            success: true,
            error: String::new(),
            id: "doc-1".to_string(),
        };
        assert_eq!(mutation_result("create link", ok).unwrap(), "doc-1");

        let denied = proto::MutationResponse {
            success: false,
            error: "permission denied".to_string(),
            id: String::new(),
        };
        let err = mutation_result("create link", denied).unwrap_err();
        assert!(err.to_string().contains("permission denied"));
    }

    #[test]
    fn test_parse_role() {
        assert_eq!(parse_role("admin"), Role::Admin);
        assert_eq!(parse_role("viewer"), Role::Viewer);
        assert_eq!(parse_role(""), Role::Viewer);
    }

    #[test]
    fn test_parse_kind_round_trips_labels() {
        for kind in [LinkKind::Embed, LinkKind::External, LinkKind::Protocol] {
            assert_eq!(parse_kind(kind.label()), kind);
        }
        assert_eq!(parse_kind("unknown"), LinkKind::Embed);
    }

    #[test]
    fn test_parse_open_in_round_trips_labels() {
        for target in [OpenTarget::Pane, OpenTarget::NewTab] {
            assert_eq!(parse_open_in(target.label()), target);
        }
        assert_eq!(parse_open_in(""), OpenTarget::Pane);
    }
}
