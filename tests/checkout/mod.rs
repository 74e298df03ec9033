mod checkout_restores_a_snapshot;
