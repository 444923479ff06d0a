//! Composition root: wire configuration and adapters into one panel.

use std::sync::Arc;

use anyhow::{Context, Result};

use mb_app::{CollectionFacade, HeroSlidePanel};
use mb_core::content::{Doctor, Facility, ImageRef, InstallmentRule, Investor, NewsItem};
use mb_core::ports::{CollectionApiPort, PreviewStorePort};
use mb_core::AdminConfig;
use mb_infra::http::{build_http_client, RestCollectionClient};
use mb_infra::InMemoryPreviewStore;

/// All admin screens of the hospital CMS, wired to the REST backend.
pub struct AdminPanel {
    pub hero: HeroSlidePanel,
    pub facilities: CollectionFacade<Facility>,
    pub news: CollectionFacade<NewsItem>,
    pub doctors: CollectionFacade<Doctor>,
    pub investors: CollectionFacade<Investor>,
    pub installment_rules: CollectionFacade<InstallmentRule>,
    previews: Arc<InMemoryPreviewStore>,
    placeholder: String,
}

impl AdminPanel {
    /// Connect every screen to the backend described by `config`.
    pub fn connect(config: &AdminConfig) -> Result<Self> {
        let http = build_http_client(&config.api).context("build HTTP client failed")?;
        let previews = Arc::new(InMemoryPreviewStore::new());
        let shared: Arc<dyn PreviewStorePort> = previews.clone();
        let base = &config.api.base_url;

        let hero_api = Arc::new(RestCollectionClient::new(http.clone(), base.clone()));
        let hero = HeroSlidePanel::from_client(hero_api, shared.clone());

        Ok(Self {
            hero,
            facilities: facade::<Facility>(&http, base, &shared),
            news: facade::<NewsItem>(&http, base, &shared),
            doctors: facade::<Doctor>(&http, base, &shared),
            investors: facade::<Investor>(&http, base, &shared),
            installment_rules: facade::<InstallmentRule>(&http, base, &shared),
            previews,
            placeholder: config.assets.placeholder_image.clone(),
        })
    }

    /// Resolve a render image reference to something displayable.
    ///
    /// A broken or missing asset degrades to the configured placeholder;
    /// it never fails the render.
    pub fn display_url(&self, image: &ImageRef) -> String {
        match image {
            ImageRef::Preview(handle) => self
                .previews
                .preview_url(*handle)
                .unwrap_or_else(|| self.placeholder.clone()),
            ImageRef::Url(url) => url.clone(),
            ImageRef::Placeholder => self.placeholder.clone(),
        }
    }
}

fn facade<E: mb_core::CollectionEntity>(
    http: &reqwest::Client,
    base: &str,
    previews: &Arc<dyn PreviewStorePort>,
) -> CollectionFacade<E> {
    let api: Arc<dyn CollectionApiPort<E>> =
        Arc::new(RestCollectionClient::<E>::new(http.clone(), base));
    CollectionFacade::from_parts(api, previews.clone(), 0)
}
