//! Payload shapes of the catalog API and their conversion into domain types.
//!
//! Only the fields the viewer uses are declared; everything else in the
//! responses is ignored by serde.

use serde::Deserialize;
use serde::de::DeserializeOwned;

use crate::error::{DexError, Result};
use crate::types::{Category, Entry, Stat, Summary, SummaryPage};

/// `{ name, url }` pair used all over the API.
#[derive(Debug, Clone, Deserialize)]
pub struct NamedResource {
    pub name: String,
    pub url: String,
}

impl From<NamedResource> for Summary {
    fn from(resource: NamedResource) -> Self {
        Summary {
            name: resource.name,
            reference: resource.url,
        }
    }
}

/// Response of `GET /pokemon?offset=&limit=`
#[derive(Debug, Deserialize)]
pub struct ListResponse {
    pub count: u32,
    pub results: Vec<NamedResource>,
}

impl From<ListResponse> for SummaryPage {
    fn from(response: ListResponse) -> Self {
        SummaryPage {
            count: response.count,
            results: response.results.into_iter().map(Summary::from).collect(),
        }
    }
}

/// Response of `GET /pokemon/{idOrName}`
#[derive(Debug, Deserialize)]
pub struct PokemonResponse {
    pub id: u32,
    pub name: String,
    pub height: u32,
    pub weight: u32,
    #[serde(default)]
    pub sprites: Sprites,
    pub types: Vec<TypeSlot>,
    pub stats: Vec<StatSlot>,
}

#[derive(Debug, Default, Deserialize)]
pub struct Sprites {
    #[serde(default)]
    pub other: Option<OtherSprites>,
}

#[derive(Debug, Default, Deserialize)]
pub struct OtherSprites {
    #[serde(rename = "official-artwork", default)]
    pub official_artwork: Option<Artwork>,
}

#[derive(Debug, Default, Deserialize)]
pub struct Artwork {
    #[serde(default)]
    pub front_default: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct TypeSlot {
    #[serde(rename = "type")]
    pub kind: NamedResource,
}

#[derive(Debug, Deserialize)]
pub struct StatSlot {
    pub base_stat: u32,
    pub stat: NamedResource,
}

impl TryFrom<PokemonResponse> for Entry {
    type Error = DexError;

    fn try_from(response: PokemonResponse) -> Result<Self> {
        if response.id == 0 {
            return Err(DexError::Decode(format!(
                "entry '{}' has identifier 0",
                response.name
            )));
        }

        let categories = response
            .types
            .iter()
            .map(|slot| {
                slot.kind.name.parse::<Category>().map_err(|_| {
                    DexError::Decode(format!(
                        "entry '{}' has unknown category '{}'",
                        response.name, slot.kind.name
                    ))
                })
            })
            .collect::<Result<Vec<_>>>()?;

        if categories.is_empty() {
            return Err(DexError::Decode(format!(
                "entry '{}' has no categories",
                response.name
            )));
        }

        let image = response
            .sprites
            .other
            .and_then(|other| other.official_artwork)
            .and_then(|artwork| artwork.front_default);

        let stats = response
            .stats
            .into_iter()
            .map(|slot| Stat {
                name: slot.stat.name,
                base: slot.base_stat,
            })
            .collect();

        Ok(Entry {
            id: response.id,
            name: response.name,
            categories,
            stats,
            image,
            height: response.height,
            weight: response.weight,
        })
    }
}

/// Response of `GET /type/{name}`
#[derive(Debug, Deserialize)]
pub struct TypeResponse {
    pub pokemon: Vec<TypeMember>,
}

#[derive(Debug, Deserialize)]
pub struct TypeMember {
    pub pokemon: NamedResource,
}

impl From<TypeResponse> for Vec<Summary> {
    fn from(response: TypeResponse) -> Self {
        response
            .pokemon
            .into_iter()
            .map(|member| Summary::from(member.pokemon))
            .collect()
    }
}

/// Deserialize a response body, reporting shape mismatches as `Decode`.
pub fn decode<T: DeserializeOwned>(body: &[u8], what: &str) -> Result<T> {
    serde_json::from_slice(body).map_err(|e| DexError::Decode(format!("{what}: {e}")))
}
