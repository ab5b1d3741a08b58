mod concurrency;
mod errors;
mod laws;
mod scenarios;
