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
        appointments::{AppointmentList, CreateAppointmentRequest},
        auth::{LoginRequest, LoginResponse, RegisterRequest},
        blogs::{BlogList, CreateBlogRequest, UpdateBlogRequest},
        cart::{AddToCartRequest, CartItemDto, CartList},
        dashboard::{DashboardData, DaySales, MonthlyRevenue, RecentOrder, WalletData},
        health_profile::{
            BaseProfileRequest, BaseProfileUpsert, GiHistoryRequest, GoalsMotivationRequest,
            HealthProfileDetail, MedicationInput, NutritionProfileRequest, SectionOutcome,
        },
        orders::{
            ConfirmOrderRequest, CreateOrderRequest, OrderLineDetail, OrderList, OrderWithProducts,
        },
        partners::{CreatePartnerRequest, PartnerList, UpdatePartnerRequest},
        products::{CreateProductRequest, ProductList, UpdateProductRequest},
    },
    entity::{
        appointments::AppointmentStatus, nutrition_profiles::DietType, orders::PaymentStatus,
    },
    models::{
        Appointment, AvailableTime, Blog, CartItem, GiHistory, GoalsMotivation, HealthProfile, LineItem, Medication,
        NutritionProfile, Order, Partner, Product, User,
    },
    response::{ApiResponse, Meta},
    routes::{
        appointments, auth, blogs, cart, dashboard, health, health_profile, orders, params,
        partners, products, users,
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
        auth::login,
        auth::register,
        users::me,
        users::create_payment_customer,
        products::list_products,
        products::list_all_products,
        products::create_product,
        products::get_product,
        products::update_product,
        products::delete_product,
        cart::cart_list,
        cart::add_to_cart,
        cart::remove_from_cart,
        partners::create_partner,
        partners::list_partners,
        partners::get_partner,
        partners::update_partner,
        appointments::create_appointment,
        appointments::partner_appointments,
        blogs::create_blog,
        blogs::list_blogs,
        blogs::get_blog,
        blogs::update_blog,
        blogs::delete_blog,
        health_profile::upsert_base_profile,
        health_profile::upsert_gi_history,
        health_profile::upsert_nutrition_profile,
        health_profile::upsert_goals_motivation,
        health_profile::get_my_profile,
        health_profile::get_user_profile,
        orders::create_order,
        orders::confirm_order,
        orders::delete_order,
        orders::list_orders,
        orders::get_order,
        dashboard::get_dashboard,
        dashboard::get_wallet
    ),
    components(
        schemas(
            User,
            Product,
            CartItem,
            Order,
            LineItem,
            PaymentStatus,
            Partner,
            AvailableTime,
            Appointment,
            AppointmentStatus,
            Blog,
            HealthProfile,
            Medication,
            GiHistory,
            NutritionProfile,
            DietType,
            GoalsMotivation,
            RegisterRequest,
            LoginRequest,
            LoginResponse,
            CreateProductRequest,
            UpdateProductRequest,
            ProductList,
            AddToCartRequest,
            CartItemDto,
            CartList,
            CreatePartnerRequest,
            UpdatePartnerRequest,
            PartnerList,
            CreateAppointmentRequest,
            AppointmentList,
            CreateBlogRequest,
            UpdateBlogRequest,
            BlogList,
            BaseProfileRequest,
            MedicationInput,
            SectionOutcome,
            BaseProfileUpsert,
            GiHistoryRequest,
            NutritionProfileRequest,
            GoalsMotivationRequest,
            HealthProfileDetail,
            CreateOrderRequest,
            ConfirmOrderRequest,
            OrderLineDetail,
            OrderWithProducts,
            OrderList,
            DaySales,
            RecentOrder,
            DashboardData,
            MonthlyRevenue,
            WalletData,
            params::Pagination,
            params::ProductQuery,
            params::OrderListQuery,
            Meta,
            ApiResponse<Product>,
            ApiResponse<ProductList>,
            ApiResponse<Order>,
            ApiResponse<OrderList>,
            ApiResponse<OrderWithProducts>,
            ApiResponse<HealthProfileDetail>,
            ApiResponse<DashboardData>,
            ApiResponse<WalletData>,
            ApiResponse<Appointment>,
            ApiResponse<AppointmentList>,
            ApiResponse<Blog>,
            ApiResponse<BlogList>
        )
    ),
    security(
        ("bearer_auth" = [])
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Health", description = "Health check endpoint"),
        (name = "Auth", description = "Authentication endpoints"),
        (name = "Users", description = "Current user endpoints"),
        (name = "Products", description = "Product catalog endpoints"),
        (name = "Cart", description = "Cart endpoints"),
        (name = "Partners", description = "Partner account endpoints"),
        (name = "Appointments", description = "Consultation booking endpoints"),
        (name = "Blogs", description = "Blog post endpoints"),
        (name = "Health Profile", description = "Health-profile intake endpoints"),
        (name = "Orders", description = "Order and payment endpoints"),
        (name = "Dashboard", description = "Admin reporting endpoints"),
    )
)]
pub struct ApiDoc;

pub fn scalar_docs() -> Scalar<OpenApiSpec> {
    Scalar::with_url("/docs", ApiDoc::openapi())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn openapi_lists_public_api_paths() {
        let doc = ApiDoc::openapi();
        let paths: Vec<&String> = doc.paths.paths.keys().collect();
        for expected in [
            "/api/orders",
            "/api/orders/confirm/{order_id}",
            "/api/orders/{id}",
            "/api/health-profile",
            "/api/health-profile/{profile_id}/gi-history",
            "/api/dashboard",
            "/api/appointments",
            "/api/appointments/partner/{partner_id}",
            "/api/blogs/{id}",
        ] {
            assert!(
                paths.iter().any(|p| p.as_str() == expected),
                "missing path {expected}"
            );
        }
    }
}
