use utoipa::{
    Modify, OpenApi,
    openapi::{
        self,
        OpenApi as OpenApiSpec,
        security::{HttpAuthScheme, HttpBuilder, SecurityScheme},
    },
};
use utoipa_scalar::{Scalar, Servable};

use crate::{
    dto::{
        admin::{
            BackupCreatedResponse, BackupInfo, BackupListResponse, DeleteResponse,
            ResourceListResponse, RestoreRequest, RestoreResponse, UploadResponse,
        },
        auth::{AuthResponse, LoginRequest, RegisterRequest},
        cart::{AddToCartRequest, CartEntry, RemoveFromCartRequest},
        content::{BannerListResponse, CategoryListResponse},
        favorites::SaveFavoritesRequest,
        orders::{CreateOrderAuthRequest, CreateOrderRequest, OrderListResponse, OrderResponse},
        products::{CreateReviewRequest, ProductDetailResponse, ProductListResponse},
    },
    models::{Banner, Category, News, Order, Product, Review, User},
    routes::{
        admin, auth, banners, cart, categories, favorites, health, news, orders, params,
        products as product_routes,
    },
};

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut openapi::OpenApi) {
        let components = openapi.components.get_or_insert_with(Default::default);
        components.add_security_scheme(
            "bearer_auth",
            SecurityScheme::Http(
                HttpBuilder::new()
                    .scheme(HttpAuthScheme::Bearer)
                    .bearer_format("JWT")
                    .build(),
            ),
        );
    }
}

#[derive(OpenApi)]
#[openapi(
    paths(
        health::health_check,
        auth::register,
        auth::login,
        product_routes::list_products,
        product_routes::get_product,
        product_routes::create_review,
        categories::list_categories,
        banners::list_banners,
        news::list_news,
        orders::create_order,
        orders::create_order_authenticated,
        orders::list_orders,
        cart::add_to_cart,
        cart::get_cart,
        cart::remove_from_cart,
        favorites::save_favorites,
        favorites::get_favorites,
        admin::list_resource,
        admin::create_resource,
        admin::update_resource,
        admin::delete_resource,
        admin::create_backup,
        admin::list_backups,
        admin::restore_backup,
        admin::upload_image,
    ),
    components(
        schemas(
            User,
            Category,
            Product,
            Review,
            Order,
            Banner,
            News,
            RegisterRequest,
            LoginRequest,
            AuthResponse,
            ProductListResponse,
            ProductDetailResponse,
            CreateReviewRequest,
            CategoryListResponse,
            BannerListResponse,
            CreateOrderRequest,
            CreateOrderAuthRequest,
            OrderResponse,
            OrderListResponse,
            AddToCartRequest,
            RemoveFromCartRequest,
            CartEntry,
            SaveFavoritesRequest,
            params::ProductListQuery,
            ResourceListResponse,
            DeleteResponse,
            BackupCreatedResponse,
            BackupInfo,
            BackupListResponse,
            RestoreRequest,
            RestoreResponse,
            UploadResponse,
        )
    ),
    security(
        ("bearer_auth" = [])
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Health", description = "Health check endpoint"),
        (name = "Auth", description = "Registration and login"),
        (name = "Products", description = "Catalog and reviews"),
        (name = "Content", description = "Categories, banners and news"),
        (name = "Orders", description = "Checkout and order history"),
        (name = "Cart", description = "Shopping cart"),
        (name = "Favorites", description = "Saved product lists"),
        (name = "Admin", description = "Resource management, backups and uploads"),
    )
)]
pub struct ApiDoc;

pub fn scalar_docs() -> Scalar<OpenApiSpec> {
    Scalar::with_url("/docs", ApiDoc::openapi())
}
