// Copyright 2025 Neil Henderson, Blue Tarp Media.

mod fixture_format;
mod invalid_programs;
mod valid_programs;
