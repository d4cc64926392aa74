// handlers/mod.rs - HTTP handlers, split by whether a principal is required
//
// public:    /login, /v3/api-docs, /health (no principal needed)
// protected: /topicos/* (each handler takes an AuthenticatedPrincipal)

pub mod protected;
pub mod public;
