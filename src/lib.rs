// Copyright (C) 2025 Andy Kurnia.

#[macro_use]
pub mod error;

pub mod alphabet;
pub mod bag;
pub mod board;
pub mod cache;
pub mod dawg;
pub mod game;
pub mod movegen;
pub mod moves;
pub mod navigators;
pub mod rack;
pub mod robot;
