pub mod u501_search;
