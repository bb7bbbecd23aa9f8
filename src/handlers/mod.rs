pub mod auth;
pub mod categories;
pub mod checkout;
pub mod gigs;
pub mod live;
pub mod search;

use actix_web::web;

pub fn init_routes(cfg: &mut web::ServiceConfig) {
    // ── Search (public; a session is forwarded when present) ──
    cfg.service(
        web::scope("/search")
            .route("", web::get().to(search::search_page))
            .route("/suggestions", web::get().to(search::suggestions)),
    );
    cfg.route("/ws/suggest", web::get().to(live::ws_suggest));

    // ── Categories ──
    cfg.route("/explore", web::get().to(categories::explore));
    cfg.route("/categories/{slug}", web::get().to(categories::category_page));

    // ── Gigs ──
    cfg.service(
        web::scope("/gigs")
            .route("", web::get().to(gigs::get_gigs))
            .route("/{id}", web::get().to(gigs::get_gig)),
    );

    // ── Checkout (requires a session) ──
    cfg.route("/checkout/{gig_id}", web::post().to(checkout::create_checkout));

    // ── Account ──
    cfg.route("/login", web::post().to(auth::login));
    cfg.route("/register", web::post().to(auth::register));
    cfg.route("/logout", web::post().to(auth::logout));
    cfg.route("/account", web::get().to(auth::account));
}
