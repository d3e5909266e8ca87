mod dashboard;
mod tracking;
mod validation;
