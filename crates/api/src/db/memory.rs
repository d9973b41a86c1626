//! In-process catalog backend.

use async_trait::async_trait;
use tokio::sync::RwLock;

use cafeconnect_core::{
    Cafe, CafeId, MenuItem, MenuItemId, MenuItemWithCafe, NewCafe, NewMenuItem,
};

use super::{CatalogStore, RepositoryError};

/// Catalog held in memory.
///
/// IDs are assigned from 1 upward and never reused, matching a `SERIAL`
/// column. Contents are lost when the process exits.
#[derive(Default)]
pub struct MemoryCatalog {
    inner: RwLock<Tables>,
}

#[derive(Default)]
struct Tables {
    cafes: Vec<Cafe>,
    menu: Vec<MenuItem>,
    last_cafe_id: i32,
    last_item_id: i32,
}

impl Tables {
    fn insert_cafe(&mut self, cafe: NewCafe) -> Cafe {
        self.last_cafe_id += 1;
        let cafe = Cafe::from_new(CafeId::new(self.last_cafe_id), cafe);
        self.cafes.push(cafe.clone());
        cafe
    }
}

impl MemoryCatalog {
    /// Create an empty catalog.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl CatalogStore for MemoryCatalog {
    async fn list_cafes(&self) -> Result<Vec<Cafe>, RepositoryError> {
        Ok(self.inner.read().await.cafes.clone())
    }

    async fn search_cafes(&self, college: &str) -> Result<Vec<Cafe>, RepositoryError> {
        let tables = self.inner.read().await;
        Ok(tables
            .cafes
            .iter()
            .filter(|cafe| cafe.serves_college(college))
            .cloned()
            .collect())
    }

    async fn insert_cafe(&self, cafe: NewCafe) -> Result<Cafe, RepositoryError> {
        Ok(self.inner.write().await.insert_cafe(cafe))
    }

    async fn replace_cafes(&self, cafes: Vec<NewCafe>) -> Result<Vec<Cafe>, RepositoryError> {
        let mut tables = self.inner.write().await;
        tables.cafes.clear();
        Ok(cafes
            .into_iter()
            .map(|cafe| tables.insert_cafe(cafe))
            .collect())
    }

    async fn list_menu(&self) -> Result<Vec<MenuItemWithCafe>, RepositoryError> {
        let tables = self.inner.read().await;
        Ok(tables
            .menu
            .iter()
            .map(|item| MenuItemWithCafe {
                cafe: item
                    .cafe_id
                    .and_then(|id| tables.cafes.iter().find(|c| c.id == id).cloned()),
                item: item.clone(),
            })
            .collect())
    }

    async fn find_menu_items(
        &self,
        ids: &[MenuItemId],
    ) -> Result<Vec<MenuItem>, RepositoryError> {
        let tables = self.inner.read().await;
        Ok(tables
            .menu
            .iter()
            .filter(|item| ids.contains(&item.id))
            .cloned()
            .collect())
    }

    async fn insert_menu_item(&self, item: NewMenuItem) -> Result<MenuItem, RepositoryError> {
        let mut tables = self.inner.write().await;
        tables.last_item_id += 1;
        let item = MenuItem::from_new(MenuItemId::new(tables.last_item_id), item);
        tables.menu.push(item.clone());
        Ok(item)
    }

    async fn ping(&self) -> Result<(), RepositoryError> {
        Ok(())
    }
}
