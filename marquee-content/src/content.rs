//! Page, menu, header, footer and form fetches against the content API.
//!
//! Every fetch comes in two flavours. `try_*` returns the [`Result`] for callers that
//! want to react to failures. The plain variants are what rendering uses: failures are
//! logged and come back as an empty list or `None`, so a broken block renders nothing
//! instead of taking the page down.

use crate::client::{ClientConfig, GraphQlClient};
use crate::error::Result;
use marquee_core::menu::resolve_menu_urls;
use marquee_core::model::{FooterRecord, FormRecord, HeaderRecord, Menu, PageRecord};
use marquee_core::paths::{build_page_paths, find_page_by_path};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde_json::json;
use tracing::{debug, info, warn};

const PAGE_FIELDS: &str = "id slug parent_id status reverse_header_colors content { blocks { id type content styles } }";

fn pages_query() -> String {
    format!("query Pages($storeId: ID!) {{ pages(storeId: $storeId) {{ {PAGE_FIELDS} }} }}")
}

fn page_by_slug_query() -> String {
    format!(
        "query PageBySlug($storeId: ID!, $slug: String!) {{ page(storeId: $storeId, slug: $slug) {{ {PAGE_FIELDS} }} }}"
    )
}

/// Levels of menu items requested, top level included. Items nested deeper are not fetched.
const MENU_DEPTH: usize = 4;

const MENU_ITEM_FIELDS: &str = "id label type url page_id";

fn menu_item_selection(depth: usize) -> String {
    if depth <= 1 {
        return MENU_ITEM_FIELDS.to_string();
    }
    format!("{MENU_ITEM_FIELDS} children {{ {} }}", menu_item_selection(depth - 1))
}

fn menu_query() -> String {
    format!(
        "query Menu($storeId: ID!, $menuId: ID!) {{ menu(storeId: $storeId, id: $menuId) {{ id name items {{ {} }} }} }}",
        menu_item_selection(MENU_DEPTH)
    )
}

const HEADER_QUERY: &str = "query Header($storeId: ID!) { header(storeId: $storeId) { id blocks { id type content styles } settings { background_color background_on_scroll text_on_scroll logo_url alternate_logo_url } } }";

const FOOTER_QUERY: &str = "query Footer($storeId: ID!) { footer(storeId: $storeId) { id blocks { id type content styles } } }";

const FORM_QUERY: &str = "query Form($storeId: ID!, $formId: ID!) { form(storeId: $storeId, id: $formId) { id name fields { name label type required } } }";

#[derive(Debug, Deserialize)]
struct PagesData {
    #[serde(default)]
    pages: Vec<PageRecord>,
}

#[derive(Debug, Deserialize)]
struct PageData {
    page: Option<PageRecord>,
}

#[derive(Debug, Deserialize)]
struct MenuData {
    menu: Option<Menu>,
}

#[derive(Debug, Deserialize)]
struct HeaderData {
    header: Option<HeaderRecord>,
}

#[derive(Debug, Deserialize)]
struct FooterData {
    footer: Option<FooterRecord>,
}

#[derive(Debug, Deserialize)]
struct FormData {
    form: Option<FormRecord>,
}

fn or_empty<T>(what: &str, result: Result<Vec<T>>) -> Vec<T> {
    result.unwrap_or_else(|e| {
        warn!("Failed to fetch {}: {}", what, e);
        Vec::new()
    })
}

fn or_none<T>(what: &str, result: Result<Option<T>>) -> Option<T> {
    result.unwrap_or_else(|e| {
        warn!("Failed to fetch {}: {}", what, e);
        None
    })
}

#[derive(Debug, Clone)]
pub struct ContentClient {
    graphql: GraphQlClient,
}

impl ContentClient {
    pub fn new(config: &ClientConfig) -> Result<Self> {
        Ok(Self {
            graphql: GraphQlClient::new(config)?,
        })
    }

    pub fn from_graphql(graphql: GraphQlClient) -> Self {
        Self { graphql }
    }

    async fn fetch<T: DeserializeOwned>(&self, query: &str, variables: serde_json::Value) -> Result<T> {
        self.graphql.query(query, variables).await
    }

    /// Published pages, without paths.
    pub async fn try_pages(&self, store_id: &str) -> Result<Vec<PageRecord>> {
        let data: PagesData = self
            .fetch(&pages_query(), json!({ "storeId": store_id }))
            .await?;
        let total = data.pages.len();
        let published: Vec<PageRecord> = data
            .pages
            .into_iter()
            .filter(PageRecord::is_published)
            .collect();
        debug!("Fetched {} pages ({} published)", total, published.len());
        Ok(published)
    }

    pub async fn pages(&self, store_id: &str) -> Vec<PageRecord> {
        or_empty("pages", self.try_pages(store_id).await)
    }

    pub async fn try_page_by_slug(&self, store_id: &str, slug: &str) -> Result<Option<PageRecord>> {
        let data: PageData = self
            .fetch(&page_by_slug_query(), json!({ "storeId": store_id, "slug": slug }))
            .await?;
        Ok(data.page.filter(PageRecord::is_published))
    }

    pub async fn page_by_slug(&self, store_id: &str, slug: &str) -> Option<PageRecord> {
        or_none("page", self.try_page_by_slug(store_id, slug).await)
    }

    /// Published pages annotated with their full paths.
    pub async fn try_pages_with_paths(&self, store_id: &str) -> Result<Vec<PageRecord>> {
        let pages = self.try_pages(store_id).await?;
        Ok(build_page_paths(&pages))
    }

    /// The page a request path resolves to.
    pub async fn page_for_path(&self, store_id: &str, path: &str) -> Option<PageRecord> {
        let pages = or_empty("pages", self.try_pages_with_paths(store_id).await);
        find_page_by_path(&pages, path).cloned()
    }

    pub async fn try_menu(&self, store_id: &str, menu_id: &str) -> Result<Option<Menu>> {
        let data: MenuData = self
            .fetch(&menu_query(), json!({ "storeId": store_id, "menuId": menu_id }))
            .await?;
        Ok(data.menu)
    }

    pub async fn menu(&self, store_id: &str, menu_id: &str) -> Option<Menu> {
        or_none("menu", self.try_menu(store_id, menu_id).await)
    }

    /// Fetch the menu and the page list concurrently and point internal items at page paths.
    ///
    /// Both requests must succeed; there is no partial merge.
    pub async fn try_menu_with_paths(&self, store_id: &str, menu_id: &str) -> Result<Option<Menu>> {
        let (menu, pages) = tokio::try_join!(
            self.try_menu(store_id, menu_id),
            self.try_pages_with_paths(store_id)
        )?;

        Ok(menu.map(|mut menu| {
            menu.items = resolve_menu_urls(&menu.items, &pages);
            info!("Resolved menu {} against {} pages", menu.id, pages.len());
            menu
        }))
    }

    pub async fn menu_with_paths(&self, store_id: &str, menu_id: &str) -> Option<Menu> {
        or_none("menu with paths", self.try_menu_with_paths(store_id, menu_id).await)
    }

    pub async fn try_header(&self, store_id: &str) -> Result<Option<HeaderRecord>> {
        let data: HeaderData = self.fetch(HEADER_QUERY, json!({ "storeId": store_id })).await?;
        Ok(data.header)
    }

    pub async fn header(&self, store_id: &str) -> Option<HeaderRecord> {
        or_none("header", self.try_header(store_id).await)
    }

    pub async fn try_footer(&self, store_id: &str) -> Result<Option<FooterRecord>> {
        let data: FooterData = self.fetch(FOOTER_QUERY, json!({ "storeId": store_id })).await?;
        Ok(data.footer)
    }

    pub async fn footer(&self, store_id: &str) -> Option<FooterRecord> {
        or_none("footer", self.try_footer(store_id).await)
    }

    pub async fn try_form(&self, store_id: &str, form_id: &str) -> Result<Option<FormRecord>> {
        let data: FormData = self
            .fetch(FORM_QUERY, json!({ "storeId": store_id, "formId": form_id }))
            .await?;
        Ok(data.form)
    }

    pub async fn form(&self, store_id: &str, form_id: &str) -> Option<FormRecord> {
        or_none("form", self.try_form(store_id, form_id).await)
    }
}
