mod chain;
mod health;
pub mod models;
mod nodes;
mod query;
mod tx;

use actix_web::web::{self, ServiceConfig};

pub use models::AppState;

pub fn init_routes(cfg: &mut ServiceConfig) {
    cfg.service(
        web::scope("/api/v1")
            .service(health::health_check)
            .service(chain::get_chain)
            .service(chain::mine)
            .service(chain::receive_new_block)
            .service(chain::consensus)
            .service(tx::post_transaction)
            .service(tx::broadcast_transaction)
            .service(tx::receive_transaction)
            .service(nodes::register_and_broadcast_node)
            .service(nodes::register_node)
            .service(nodes::register_nodes_bulk)
            .service(query::get_block)
            .service(query::get_transaction)
            .service(query::get_address),
    );
}
