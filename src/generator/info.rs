use crate::config::{InfoConfig, TagConfig};
use crate::document::{Contact, ExternalDocs, Info, License, Tag};

/// Generator for the OpenAPI Info Object
#[derive(Debug, Clone, Copy, Default)]
pub struct InfoGenerator;

impl InfoGenerator {
    pub fn generate(&self, config: &InfoConfig) -> Info {
        Info {
            title: config.title.clone(),
            version: config.version.clone(),
            description: config.description.clone(),
            terms_of_service: config.terms_of_service.clone(),
            contact: config.contact.as_ref().map(|c| Contact {
                name: c.name.clone(),
                url: c.url.clone(),
                email: c.email.clone(),
            }),
            license: config.license.as_ref().map(|l| License {
                name: l.name.clone(),
                url: l.url.clone(),
            }),
        }
    }
}

/// Generator for the top-level tag definitions
#[derive(Debug, Clone, Copy, Default)]
pub struct TagsGenerator;

impl TagsGenerator {
    pub fn generate(&self, configs: &[TagConfig]) -> Vec<Tag> {
        configs
            .iter()
            .map(|config| Tag {
                name: config.name.clone(),
                description: config.description.clone(),
                external_docs: config.external_docs_url.as_ref().map(|url| ExternalDocs {
                    url: url.clone(),
                    description: config.external_docs_description.clone(),
                }),
            })
            .collect()
    }
}
