mod account;
mod consent_flow;
mod scenarios;
