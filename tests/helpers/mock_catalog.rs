// ==========================================
// Mock 目录存储 - 用于集成测试
// ==========================================
// 行为: 内存商品目录 + 完整调用记录（用于断言变更调用次数）
// ==========================================

use async_trait::async_trait;
use shopify_import_engine::catalog::{CatalogError, CatalogStore};
use shopify_import_engine::domain::{
    ProductPayload, RemoteProduct, RemoteVariant, VariantPayload,
};
use std::sync::Mutex;

/// 目录调用记录
#[derive(Debug, Clone, PartialEq)]
pub enum CatalogCall {
    LookupById(i64),
    LookupByHandle(String),
    ListVariants(i64),
    CreateProduct,
    UpdateProduct(i64),
    CreateVariant(i64),
    UpdateVariant(i64),
}

impl CatalogCall {
    /// 是否为变更调用（创建/更新）
    pub fn is_mutation(&self) -> bool {
        matches!(
            self,
            CatalogCall::CreateProduct
                | CatalogCall::UpdateProduct(_)
                | CatalogCall::CreateVariant(_)
                | CatalogCall::UpdateVariant(_)
        )
    }
}

#[derive(Default)]
struct MockState {
    products: Vec<RemoteProduct>,
    next_product_id: i64,
    next_variant_id: i64,
    calls: Vec<CatalogCall>,
}

/// 内存目录存储
pub struct MockCatalogStore {
    state: Mutex<MockState>,
}

impl MockCatalogStore {
    pub fn new() -> Self {
        Self {
            state: Mutex::new(MockState {
                products: Vec::new(),
                next_product_id: 1000,
                next_variant_id: 5000,
                calls: Vec::new(),
            }),
        }
    }

    /// 预置一个远程商品
    pub fn with_product(self, product: RemoteProduct) -> Self {
        self.state.lock().unwrap().products.push(product);
        self
    }

    /// 全部调用记录
    pub fn calls(&self) -> Vec<CatalogCall> {
        self.state.lock().unwrap().calls.clone()
    }

    /// 变更调用次数
    pub fn mutation_count(&self) -> usize {
        self.calls().iter().filter(|c| c.is_mutation()).count()
    }

    /// 指定种类的调用次数
    pub fn count_calls(&self, predicate: impl Fn(&CatalogCall) -> bool) -> usize {
        self.calls().iter().filter(|c| predicate(c)).count()
    }

    /// 按 handle 读取当前目录状态
    pub fn product_by_handle(&self, handle: &str) -> Option<RemoteProduct> {
        self.state
            .lock()
            .unwrap()
            .products
            .iter()
            .find(|p| p.handle.as_deref() == Some(handle))
            .cloned()
    }

    fn not_found(what: &str) -> CatalogError {
        CatalogError::UnexpectedStatus {
            status: 404,
            endpoint: what.to_string(),
            body: String::new(),
        }
    }
}

/// 构造预置远程商品
pub fn remote_product(id: i64, handle: &str, title: &str) -> RemoteProduct {
    RemoteProduct {
        id,
        title: Some(title.to_string()),
        handle: Some(handle.to_string()),
        body_html: None,
        vendor: None,
        product_type: None,
        tags: None,
        variants: vec![],
    }
}

/// 构造预置远程变体
pub fn remote_variant(id: i64, product_id: i64, sku: &str) -> RemoteVariant {
    RemoteVariant {
        id,
        product_id: Some(product_id),
        sku: Some(sku.to_string()),
        price: None,
        compare_at_price: None,
        inventory_quantity: None,
        weight: None,
        option1: None,
        option2: None,
        option3: None,
    }
}

#[async_trait]
impl CatalogStore for MockCatalogStore {
    async fn lookup_by_id(&self, id: i64) -> Result<Option<RemoteProduct>, CatalogError> {
        let mut state = self.state.lock().unwrap();
        state.calls.push(CatalogCall::LookupById(id));
        Ok(state.products.iter().find(|p| p.id == id).cloned())
    }

    async fn lookup_by_handle(
        &self,
        handle: &str,
    ) -> Result<Option<RemoteProduct>, CatalogError> {
        let mut state = self.state.lock().unwrap();
        state.calls.push(CatalogCall::LookupByHandle(handle.to_string()));
        Ok(state
            .products
            .iter()
            .find(|p| p.handle.as_deref() == Some(handle))
            .cloned())
    }

    async fn list_variants(&self, product_id: i64) -> Result<Vec<RemoteVariant>, CatalogError> {
        let mut state = self.state.lock().unwrap();
        state.calls.push(CatalogCall::ListVariants(product_id));
        state
            .products
            .iter()
            .find(|p| p.id == product_id)
            .map(|p| p.variants.clone())
            .ok_or_else(|| Self::not_found("list_variants"))
    }

    async fn create_product(
        &self,
        payload: &ProductPayload,
    ) -> Result<RemoteProduct, CatalogError> {
        let mut state = self.state.lock().unwrap();
        state.calls.push(CatalogCall::CreateProduct);

        state.next_product_id += 1;
        let product = RemoteProduct {
            id: state.next_product_id,
            title: payload.title.clone(),
            handle: payload.handle.clone(),
            body_html: payload.body_html.clone(),
            vendor: payload.vendor.clone(),
            product_type: payload.product_type.clone(),
            tags: payload.tags.clone(),
            variants: vec![],
        };
        state.products.push(product.clone());
        Ok(product)
    }

    async fn update_product(
        &self,
        id: i64,
        payload: &ProductPayload,
    ) -> Result<RemoteProduct, CatalogError> {
        let mut state = self.state.lock().unwrap();
        state.calls.push(CatalogCall::UpdateProduct(id));

        let product = state
            .products
            .iter_mut()
            .find(|p| p.id == id)
            .ok_or_else(|| Self::not_found("update_product"))?;

        if let Some(title) = &payload.title {
            product.title = Some(title.clone());
        }
        if let Some(handle) = &payload.handle {
            product.handle = Some(handle.clone());
        }
        if let Some(body_html) = &payload.body_html {
            product.body_html = Some(body_html.clone());
        }
        if let Some(vendor) = &payload.vendor {
            product.vendor = Some(vendor.clone());
        }
        if let Some(product_type) = &payload.product_type {
            product.product_type = Some(product_type.clone());
        }
        if let Some(tags) = &payload.tags {
            product.tags = Some(tags.clone());
        }

        Ok(product.clone())
    }

    async fn create_variant(
        &self,
        product_id: i64,
        payload: &VariantPayload,
    ) -> Result<RemoteVariant, CatalogError> {
        let mut state = self.state.lock().unwrap();
        state.calls.push(CatalogCall::CreateVariant(product_id));

        state.next_variant_id += 1;
        let variant = RemoteVariant {
            id: state.next_variant_id,
            product_id: Some(product_id),
            sku: payload.sku.clone(),
            price: payload.price.map(|p| format!("{:.2}", p)),
            compare_at_price: payload.compare_at_price.map(|p| format!("{:.2}", p)),
            inventory_quantity: payload.inventory_quantity,
            weight: payload.weight,
            option1: payload.option1.clone(),
            option2: payload.option2.clone(),
            option3: payload.option3.clone(),
        };

        let product = state
            .products
            .iter_mut()
            .find(|p| p.id == product_id)
            .ok_or_else(|| Self::not_found("create_variant"))?;
        product.variants.push(variant.clone());

        Ok(variant)
    }

    async fn update_variant(
        &self,
        variant_id: i64,
        payload: &VariantPayload,
    ) -> Result<RemoteVariant, CatalogError> {
        let mut state = self.state.lock().unwrap();
        state.calls.push(CatalogCall::UpdateVariant(variant_id));

        let variant = state
            .products
            .iter_mut()
            .flat_map(|p| p.variants.iter_mut())
            .find(|v| v.id == variant_id)
            .ok_or_else(|| Self::not_found("update_variant"))?;

        if let Some(sku) = &payload.sku {
            variant.sku = Some(sku.clone());
        }
        if let Some(price) = payload.price {
            variant.price = Some(format!("{:.2}", price));
        }
        if let Some(compare_at) = payload.compare_at_price {
            variant.compare_at_price = Some(format!("{:.2}", compare_at));
        }
        if let Some(quantity) = payload.inventory_quantity {
            variant.inventory_quantity = Some(quantity);
        }
        if let Some(weight) = payload.weight {
            variant.weight = Some(weight);
        }
        if let Some(option1) = &payload.option1 {
            variant.option1 = Some(option1.clone());
        }
        if let Some(option2) = &payload.option2 {
            variant.option2 = Some(option2.clone());
        }
        if let Some(option3) = &payload.option3 {
            variant.option3 = Some(option3.clone());
        }

        Ok(variant.clone())
    }
}
