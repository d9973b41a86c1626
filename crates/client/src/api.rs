//! HTTP client for the CafeConnect API.

use serde::Deserialize;
use serde::de::DeserializeOwned;
use url::Url;

use cafeconnect_core::{
    Cafe, CartId, CartView, MenuItem, MenuItemId, MenuItemWithCafe, MenuSections,
    NewCafeRequest, NewMenuItemRequest,
};

use crate::error::ClientError;

/// Error body returned by the API.
#[derive(Deserialize)]
struct ErrorBody {
    error: String,
}

/// Client for one CafeConnect API deployment.
#[derive(Clone, Debug)]
pub struct ApiClient {
    http_client: reqwest::Client,
    base_url: Url,
}

impl ApiClient {
    /// Create a client for the API at `base_url` (e.g. `http://localhost:5000`).
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::InvalidBaseUrl`] if `base_url` is not an
    /// absolute URL that can carry a path.
    pub fn new(base_url: &str) -> Result<Self, ClientError> {
        Self::with_http_client(reqwest::Client::new(), base_url)
    }

    /// Create a client that sends requests through `http_client`.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::InvalidBaseUrl`] if `base_url` is not an
    /// absolute URL that can carry a path.
    pub fn with_http_client(
        http_client: reqwest::Client,
        base_url: &str,
    ) -> Result<Self, ClientError> {
        let base_url = Url::parse(base_url)
            .map_err(|e| ClientError::InvalidBaseUrl(format!("{base_url}: {e}")))?;
        if base_url.cannot_be_a_base() {
            return Err(ClientError::InvalidBaseUrl(base_url.to_string()));
        }
        Ok(Self {
            http_client,
            base_url,
        })
    }

    /// URL for `segments` below the base URL. Each segment is percent-encoded,
    /// `/` included.
    fn endpoint(&self, segments: &[&str]) -> Result<Url, ClientError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|()| ClientError::InvalidBaseUrl(self.base_url.to_string()))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    async fn get<T: DeserializeOwned>(&self, segments: &[&str]) -> Result<T, ClientError> {
        let response = self.http_client.get(self.endpoint(segments)?).send().await?;
        read_json(response).await
    }

    async fn post<T: DeserializeOwned>(
        &self,
        segments: &[&str],
        body: Option<&impl serde::Serialize>,
    ) -> Result<T, ClientError> {
        let mut request = self.http_client.post(self.endpoint(segments)?);
        if let Some(body) = body {
            request = request.json(body);
        }
        read_json(request.send().await?).await
    }

    async fn delete<T: DeserializeOwned>(&self, segments: &[&str]) -> Result<T, ClientError> {
        let response = self
            .http_client
            .delete(self.endpoint(segments)?)
            .send()
            .await?;
        read_json(response).await
    }

    /// All cafes.
    ///
    /// # Errors
    ///
    /// Returns `ClientError` if the request fails or the body is invalid.
    pub async fn list_cafes(&self) -> Result<Vec<Cafe>, ClientError> {
        self.get(&["api", "cafes"]).await
    }

    /// Cafes near a college (case-insensitive substring match).
    ///
    /// The query is sent as given; callers decide what to do with blank input.
    /// `.` and `..` cannot travel as a path segment, so those are matched
    /// locally against the full cafe list.
    ///
    /// # Errors
    ///
    /// Returns `ClientError` if the request fails or the body is invalid.
    pub async fn search_cafes(&self, college: &str) -> Result<Vec<Cafe>, ClientError> {
        if is_dot_segment(college) {
            let mut cafes = self.list_cafes().await?;
            cafes.retain(|cafe| cafe.serves_college(college));
            return Ok(cafes);
        }
        self.get(&["api", "cafes", "search", college]).await
    }

    /// Create a cafe.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Status`] with status 400 if the server rejects
    /// the record.
    pub async fn create_cafe(&self, cafe: &NewCafeRequest) -> Result<Cafe, ClientError> {
        self.post(&["api", "cafes"], Some(cafe)).await
    }

    /// All menu items with their owning cafe.
    ///
    /// # Errors
    ///
    /// Returns `ClientError` if the request fails or the body is invalid.
    pub async fn list_menu(&self) -> Result<Vec<MenuItemWithCafe>, ClientError> {
        self.get(&["api", "menu"]).await
    }

    /// Menu grouped into storefront sections by the server.
    ///
    /// # Errors
    ///
    /// Returns `ClientError` if the request fails or the body is invalid.
    pub async fn menu_sections(&self) -> Result<MenuSections, ClientError> {
        self.get(&["api", "menu", "sections"]).await
    }

    /// Create a menu item.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Status`] with status 400 if the server rejects
    /// the record.
    pub async fn create_menu_item(
        &self,
        item: &NewMenuItemRequest,
    ) -> Result<MenuItem, ClientError> {
        self.post(&["api", "menu"], Some(item)).await
    }

    /// Start a server-side cart.
    ///
    /// # Errors
    ///
    /// Returns `ClientError` if the request fails or the body is invalid.
    pub async fn create_cart(&self) -> Result<CartView, ClientError> {
        self.post(&["api", "carts"], None::<&()>).await
    }

    /// Current contents of a cart.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Status`] with status 404 if the cart is unknown
    /// or expired.
    pub async fn cart(&self, id: CartId) -> Result<CartView, ClientError> {
        self.get(&["api", "carts", &id.to_string()]).await
    }

    /// Add one unit of `item` to a cart.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Status`] with status 404 if the cart or the item
    /// is unknown.
    pub async fn add_to_cart(
        &self,
        id: CartId,
        item: MenuItemId,
    ) -> Result<CartView, ClientError> {
        self.post(
            &["api", "carts", &id.to_string(), "items", &item.to_string()],
            None::<&()>,
        )
        .await
    }

    /// Remove one unit of `item` from a cart.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Status`] with status 404 if the cart is unknown.
    pub async fn remove_from_cart(
        &self,
        id: CartId,
        item: MenuItemId,
    ) -> Result<CartView, ClientError> {
        self.delete(&["api", "carts", &id.to_string(), "items", &item.to_string()])
            .await
    }

    /// Discard a cart.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Status`] with status 404 if the cart is unknown.
    pub async fn discard_cart(&self, id: CartId) -> Result<(), ClientError> {
        let response = self
            .http_client
            .delete(self.endpoint(&["api", "carts", &id.to_string()])?)
            .send()
            .await?;
        if !response.status().is_success() {
            return Err(status_error(response).await);
        }
        Ok(())
    }
}

/// Segments the URL parser resolves away instead of sending.
fn is_dot_segment(segment: &str) -> bool {
    matches!(segment, "." | "..")
}

async fn read_json<T: DeserializeOwned>(response: reqwest::Response) -> Result<T, ClientError> {
    if !response.status().is_success() {
        return Err(status_error(response).await);
    }
    let body = response.bytes().await?;
    Ok(serde_json::from_slice(&body)?)
}

async fn status_error(response: reqwest::Response) -> ClientError {
    let status = response.status();
    let message = match response.json::<ErrorBody>().await {
        Ok(body) => body.error,
        Err(_) => status.canonical_reason().unwrap_or_default().to_string(),
    };
    ClientError::Status { status, message }
}
