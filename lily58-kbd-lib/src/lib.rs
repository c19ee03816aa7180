#![cfg_attr(not(test), no_std)]

pub mod action;
pub mod debounce;
pub mod encoder;
pub mod keycode;
pub mod keymap;
pub mod layer;
pub mod matrix;
pub mod oled;
pub mod report;
pub mod rgb;
pub mod ring_buffer;
pub mod sleep;
