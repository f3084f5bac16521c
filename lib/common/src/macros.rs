mod meta;
mod names;
