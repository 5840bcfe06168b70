mod common;
mod flow;
mod routing;
