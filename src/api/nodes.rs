use actix_web::{HttpResponse, Responder, post, web};
use log::info;

use super::models::{AppState, BulkRegisterRequest, NoteResponse, RegisterNodeRequest};

/// Register a node locally, announce it to every existing peer, then send
/// the complete registry back to the new node.
#[post("/register-and-broadcast-node/")]
pub async fn register_and_broadcast_node(
    state: web::Data<AppState>,
    body: web::Json<RegisterNodeRequest>,
) -> impl Responder {
    let new_node_url = body.into_inner().new_node_url;

    let (existing_peers, all_nodes) = {
        let mut bc = state.ledger.lock().expect("mutex poisoned");
        let existing: Vec<String> = bc
            .network_nodes
            .iter()
            .filter(|n| **n != new_node_url)
            .cloned()
            .collect();
        bc.register_node(&new_node_url);

        let mut all = bc.network_nodes.clone();
        all.push(bc.node_url.clone());
        (existing, all)
    };

    state
        .client
        .broadcast_registration(&existing_peers, &new_node_url)
        .await;
    state.client.register_bulk(&new_node_url, all_nodes).await;

    info!("registered and broadcast new node {new_node_url}");
    HttpResponse::Ok().json(NoteResponse {
        note: "New node registered with network successfully".to_string(),
    })
}

/// Accept a single-node registration announced by a peer.
#[post("/register-node/")]
pub async fn register_node(
    state: web::Data<AppState>,
    body: web::Json<RegisterNodeRequest>,
) -> impl Responder {
    let new_node_url = body.into_inner().new_node_url;
    {
        let mut bc = state.ledger.lock().expect("mutex poisoned");
        bc.register_node(&new_node_url);
    }
    HttpResponse::Ok().json(NoteResponse {
        note: "New node registered successfully".to_string(),
    })
}

/// Accept the whole registry, sent to a node when it joins the network.
#[post("/register-nodes-bulk/")]
pub async fn register_nodes_bulk(
    state: web::Data<AppState>,
    body: web::Json<BulkRegisterRequest>,
) -> impl Responder {
    let all_network_nodes = body.into_inner().all_network_nodes;
    {
        let mut bc = state.ledger.lock().expect("mutex poisoned");
        for node_url in &all_network_nodes {
            bc.register_node(node_url);
        }
    }
    HttpResponse::Ok().json(NoteResponse {
        note: "Bulk registration successful".to_string(),
    })
}
