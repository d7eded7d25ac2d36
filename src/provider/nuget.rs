//! Live NuGet v3 registry provider
//!
//! Resolution of one package goes through four requests:
//!
//! 1. the service index (fetched once, on [`NuGetProvider::connect`])
//! 2. the registration index of the package, plus any registration pages
//!    that are not inlined
//! 3. the `.nupkg` archive of the latest stable version
//! 4. the `.nuspec` manifest inside that archive, parsed for dependencies

use std::collections::HashSet;
use std::io::{Cursor, Read};

use reqwest::blocking::Client;
use serde::Deserialize;
use serde::de::DeserializeOwned;

use super::DependencyProvider;
use crate::constants::registry::{DOWNLOAD_TIMEOUT, REQUEST_TIMEOUT, USER_AGENT};
use crate::error::DepGraphError;

const REGISTRATIONS_RESOURCE: &str = "RegistrationsBaseUrl";
const REGISTRATIONS_RESOURCE_VERSIONED: &str = "RegistrationsBaseUrl/3.6.0";
const PACKAGE_BASE_RESOURCE: &str = "PackageBaseAddress/3.0.0";

#[derive(Debug, Deserialize)]
struct ServiceIndex {
    #[serde(default)]
    resources: Vec<ServiceResource>,
}

#[derive(Debug, Deserialize)]
struct ServiceResource {
    #[serde(rename = "@id")]
    id: String,
    #[serde(rename = "@type")]
    resource_type: String,
}

#[derive(Debug, Deserialize)]
struct RegistrationIndex {
    #[serde(default)]
    items: Vec<RegistrationPage>,
}

#[derive(Debug, Deserialize)]
struct RegistrationPage {
    #[serde(rename = "@id")]
    id: String,
    /// Absent when the registry pages the listing out of the index
    items: Option<Vec<RegistrationLeaf>>,
}

#[derive(Debug, Deserialize)]
struct RegistrationLeaf {
    #[serde(rename = "catalogEntry")]
    catalog_entry: CatalogEntry,
}

#[derive(Debug, Deserialize)]
struct CatalogEntry {
    version: Option<String>,
    #[serde(rename = "isPrerelease", default)]
    is_prerelease: bool,
    listed: Option<bool>,
}

impl CatalogEntry {
    fn stable_version(&self) -> Option<&str> {
        let version = self.version.as_deref()?;
        let prerelease = self.is_prerelease || version.contains('-');
        if prerelease || self.listed == Some(false) {
            None
        } else {
            Some(version)
        }
    }
}

#[derive(Debug, Deserialize)]
struct Nuspec {
    metadata: NuspecMetadata,
}

#[derive(Debug, Deserialize)]
struct NuspecMetadata {
    dependencies: Option<NuspecDependencies>,
}

#[derive(Debug, Default, Deserialize)]
struct NuspecDependencies {
    #[serde(rename = "group", default)]
    groups: Vec<NuspecGroup>,
    #[serde(rename = "dependency", default)]
    dependencies: Vec<NuspecDependency>,
}

#[derive(Debug, Deserialize)]
struct NuspecGroup {
    #[serde(rename = "dependency", default)]
    dependencies: Vec<NuspecDependency>,
}

#[derive(Debug, Deserialize)]
struct NuspecDependency {
    #[serde(rename = "@id")]
    id: String,
}

/// Provider resolving packages against a NuGet v3 feed
pub struct NuGetProvider {
    client: Client,
    registrations_base: String,
    package_base: String,
}

impl NuGetProvider {
    /// Connect to the feed described by `service_index_url`
    ///
    /// Fails with [`DepGraphError::RegistryUnavailable`] when the service
    /// index cannot be fetched or lacks the required resources.
    pub fn connect(service_index_url: &str) -> Result<Self, DepGraphError> {
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| DepGraphError::Http {
                url: service_index_url.to_string(),
                source: e,
            })?;

        let unavailable = |message: String| DepGraphError::RegistryUnavailable {
            url: service_index_url.to_string(),
            message,
        };

        let index: ServiceIndex = fetch_json(&client, service_index_url)
            .map_err(|e| unavailable(format!("service index could not be loaded ({e})")))?;

        // The unversioned registration resource serves uncompressed pages
        let registrations_base = find_resource(&index, REGISTRATIONS_RESOURCE)
            .or_else(|| find_resource(&index, REGISTRATIONS_RESOURCE_VERSIONED))
            .ok_or_else(|| unavailable(format!("no {REGISTRATIONS_RESOURCE} resource")))?;
        let package_base = find_resource(&index, PACKAGE_BASE_RESOURCE)
            .ok_or_else(|| unavailable(format!("no {PACKAGE_BASE_RESOURCE} resource")))?;

        Ok(Self {
            client,
            registrations_base,
            package_base,
        })
    }

    /// Latest stable, listed version of `package`
    pub fn latest_stable_version(&self, package: &str) -> Result<String, DepGraphError> {
        let url = format!(
            "{}/{}/index.json",
            self.registrations_base.trim_end_matches('/'),
            package.to_lowercase()
        );
        let index: RegistrationIndex = fetch_json(&self.client, &url)?;

        let mut versions = Vec::new();
        for page in index.items {
            let leaves = match page.items {
                Some(leaves) => leaves,
                None => fetch_json::<RegistrationPage>(&self.client, &page.id)?
                    .items
                    .unwrap_or_default(),
            };
            versions.extend(
                leaves
                    .iter()
                    .filter_map(|leaf| leaf.catalog_entry.stable_version())
                    .map(str::to_string),
            );
        }

        select_latest(&versions)
            .map(str::to_string)
            .ok_or_else(|| DepGraphError::NoStableVersion {
                package: package.to_string(),
            })
    }

    fn download_package(&self, package: &str, version: &str) -> Result<Vec<u8>, DepGraphError> {
        let id = package.to_lowercase();
        let version = version.to_lowercase();
        let url = format!(
            "{}/{id}/{version}/{id}.{version}.nupkg",
            self.package_base.trim_end_matches('/')
        );

        let http_error = |e| DepGraphError::Http {
            url: url.clone(),
            source: e,
        };
        let bytes = self
            .client
            .get(&url)
            .timeout(DOWNLOAD_TIMEOUT)
            .send()
            .and_then(|r| r.error_for_status())
            .and_then(|r| r.bytes())
            .map_err(http_error)?;

        Ok(bytes.to_vec())
    }
}

impl DependencyProvider for NuGetProvider {
    fn direct_dependencies(&self, package: &str) -> Result<Vec<String>, DepGraphError> {
        let version = self.latest_stable_version(package)?;
        let archive = self.download_package(package, &version)?;
        let nuspec = read_nuspec(package, &archive)?;
        parse_nuspec_dependencies(package, &nuspec)
    }
}

fn fetch_json<T: DeserializeOwned>(client: &Client, url: &str) -> Result<T, DepGraphError> {
    client
        .get(url)
        .send()
        .and_then(|r| r.error_for_status())
        .and_then(|r| r.json::<T>())
        .map_err(|e| DepGraphError::Http {
            url: url.to_string(),
            source: e,
        })
}

fn find_resource(index: &ServiceIndex, resource_type: &str) -> Option<String> {
    index
        .resources
        .iter()
        .find(|r| r.resource_type == resource_type)
        .map(|r| r.id.clone())
}

/// Numeric sort key from the first three dot-separated components
///
/// Components that are not plain numbers count as zero.
fn version_key(version: &str) -> [u64; 3] {
    let mut key = [0; 3];
    for (slot, part) in key.iter_mut().zip(version.split('.')) {
        *slot = part.parse().unwrap_or(0);
    }
    key
}

/// Highest version by [`version_key`]; the first one wins on ties
fn select_latest(versions: &[String]) -> Option<&str> {
    let mut best: Option<&str> = None;
    for version in versions {
        match best {
            Some(current) if version_key(version) <= version_key(current) => {}
            _ => best = Some(version),
        }
    }
    best
}

/// Extract the `.nuspec` manifest from a package archive
fn read_nuspec(package: &str, archive: &[u8]) -> Result<String, DepGraphError> {
    let archive_error = |e| DepGraphError::Archive {
        package: package.to_string(),
        source: e,
    };
    let mut zip = zip::ZipArchive::new(Cursor::new(archive)).map_err(archive_error)?;

    let name = zip
        .file_names()
        .find(|name| name.ends_with(".nuspec"))
        .map(str::to_string)
        .ok_or_else(|| DepGraphError::MissingManifest {
            package: package.to_string(),
        })?;

    let mut content = String::new();
    zip.by_name(&name)
        .map_err(archive_error)?
        .read_to_string(&mut content)?;
    Ok(content)
}

/// Dependency ids of a manifest, in document order across all framework
/// groups, without duplicates
fn parse_nuspec_dependencies(package: &str, nuspec: &str) -> Result<Vec<String>, DepGraphError> {
    let manifest: Nuspec =
        quick_xml::de::from_str(nuspec).map_err(|e| DepGraphError::ManifestParse {
            package: package.to_string(),
            source: e,
        })?;

    let declared = manifest.metadata.dependencies.unwrap_or_default();
    let mut seen = HashSet::new();
    let ids = declared
        .dependencies
        .into_iter()
        .chain(declared.groups.into_iter().flat_map(|g| g.dependencies))
        .map(|dep| dep.id)
        .filter(|id| seen.insert(id.clone()))
        .collect();
    Ok(ids)
}
