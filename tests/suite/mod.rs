mod app_flow;
mod store;
mod thunks;
