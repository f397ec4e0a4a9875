mod controller;
mod util;
