mod reload;
