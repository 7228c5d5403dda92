mod details;
mod panels;

pub(super) use panels::top_bar;
