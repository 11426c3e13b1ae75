//! `actix-web` HTTP/JSON adapter exposing a single shared [`HandEngine`] instance. All
//! responses are `application/json` with CORS wide open, matching §6.2's fixed contract.

use std::sync::Mutex;

use actix_cors::Cors;
use actix_web::middleware::Logger;
use actix_web::{web, App, HttpResponse, HttpServer, Responder};
use clap::Parser;

use crate::holdem::dto::{ActionDto, ApplyActionRequest, ErrorResponse, OkResponse, StateDto, TerminalResultDto};
use crate::holdem::engine::{legal_actions, terminal_payoff, HandEngine, State};
use crate::{Chips, B_BLIND, S_BLIND, STACK};

#[derive(Debug, Clone, Parser)]
#[command(author, version, about = "Heads-up hold'em engine HTTP adapter")]
pub struct ServerConfig {
    #[arg(long, env = "BIND_ADDR", default_value = "127.0.0.1:8888")]
    pub bind: String,
    #[arg(long, default_value_t = 1337)]
    pub seed: u64,
    #[arg(long, default_value_t = STACK)]
    pub starting_stack: Chips,
    #[arg(long, default_value_t = S_BLIND)]
    pub small_blind: Chips,
    #[arg(long, default_value_t = B_BLIND)]
    pub big_blind: Chips,
}

struct Table {
    engine: HandEngine,
    hand: State,
}

type SharedTable = web::Data<Mutex<Table>>;

pub struct Server;

impl Server {
    pub async fn run(config: ServerConfig) -> std::io::Result<()> {
        let mut engine = HandEngine::new(config.seed);
        let hand = engine.new_hand(config.starting_stack, config.small_blind, config.big_blind);
        let table = web::Data::new(Mutex::new(Table { engine, hand }));
        let config = web::Data::new(config);

        log::info!("starting holdem server on {}", config.bind);
        let bind = config.bind.clone();
        HttpServer::new(move || {
            App::new()
                .wrap(Logger::new("%r %s %Ts"))
                .wrap(Cors::default().allow_any_origin().allow_any_method().allow_any_header())
                .app_data(table.clone())
                .app_data(config.clone())
                .app_data(json_error_config())
                .route("/new_hand", web::post().to(new_hand))
                .route("/state", web::get().to(get_state))
                .route("/legal_actions", web::get().to(get_legal_actions))
                .route("/apply_action", web::post().to(apply_action))
                .route("/apply_random_action", web::post().to(apply_random_action))
                .route("/terminal_result", web::get().to(get_terminal_result))
                .route("/health", web::get().to(health))
        })
        .workers(1)
        .bind(bind)?
        .run()
        .await
    }
}

fn json_error_config() -> web::JsonConfig {
    web::JsonConfig::default().error_handler(|err, _req| {
        let body = ErrorResponse { error: err.to_string() };
        actix_web::error::InternalError::from_response(err, HttpResponse::BadRequest().json(body)).into()
    })
}

async fn new_hand(table: SharedTable, config: web::Data<ServerConfig>) -> impl Responder {
    let mut table = table.lock().unwrap();
    table.hand = table.engine.new_hand(config.starting_stack, config.small_blind, config.big_blind);
    log::info!("dealt new hand");
    HttpResponse::Ok().json(StateDto::from(&table.hand))
}

async fn get_state(table: SharedTable) -> impl Responder {
    let table = table.lock().unwrap();
    HttpResponse::Ok().json(StateDto::from(&table.hand))
}

async fn get_legal_actions(table: SharedTable) -> impl Responder {
    let table = table.lock().unwrap();
    let actions: Vec<ActionDto> = legal_actions(&table.hand).iter().map(ActionDto::from).collect();
    HttpResponse::Ok().json(actions)
}

async fn apply_action(table: SharedTable, body: web::Json<ApplyActionRequest>) -> impl Responder {
    let mut table = table.lock().unwrap();
    let options = legal_actions(&table.hand);
    match options.get(body.index) {
        Some(&action) => {
            let ok = table.engine.apply_action(&mut table.hand, action);
            HttpResponse::Ok().json(OkResponse { ok })
        }
        None => HttpResponse::BadRequest().json(ErrorResponse {
            error: format!("action index {} out of range (0..{})", body.index, options.len()),
        }),
    }
}

async fn apply_random_action(table: SharedTable) -> impl Responder {
    let mut table = table.lock().unwrap();
    if legal_actions(&table.hand).is_empty() {
        return HttpResponse::BadRequest().json(ErrorResponse { error: "hand is already terminal".into() });
    }
    let action = table.engine.random_legal_action(&table.hand);
    let ok = table.engine.apply_action(&mut table.hand, action);
    HttpResponse::Ok().json(OkResponse { ok })
}

async fn get_terminal_result(table: SharedTable) -> impl Responder {
    let table = table.lock().unwrap();
    HttpResponse::Ok().json(TerminalResultDto::from(terminal_payoff(&table.hand)))
}

async fn health() -> impl Responder {
    HttpResponse::Ok().json(OkResponse { ok: true })
}
